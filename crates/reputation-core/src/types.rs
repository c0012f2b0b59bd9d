use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Source of a sentiment observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Article,
    Review,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Article => "article",
            EventKind::Review => "review",
        }
    }
}

/// Sentiment label assigned by the upstream classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Map the label onto the 0-1 score scale (1.0 = most positive)
    pub fn to_score(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Neutral => 0.5,
            SentimentLabel::Negative => 0.0,
        }
    }

    /// Case-insensitive parse; `None` for text the classifier never emits
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "negative" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Coarse polarity band over the normalized score scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    /// Band a score: above 0.6 reads positive, below 0.4 negative
    pub fn from_score(score: f64) -> Self {
        if score > 0.6 {
            Polarity::Positive
        } else if score < 0.4 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Neutral => "neutral",
            Polarity::Negative => "negative",
        }
    }
}

/// A timestamped, weighted sentiment observation about the monitored company
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentEvent {
    pub timestamp: DateTime<Utc>,
    /// Normalized sentiment score, 0.0 (most negative) to 1.0 (most positive)
    pub score: f64,
    /// Observation mass, 0.0 to 1.0
    pub weight: f64,
    pub kind: EventKind,
}

impl SentimentEvent {
    pub fn polarity(&self) -> Polarity {
        Polarity::from_score(self.score)
    }

    /// UTC calendar day the event falls on
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// One calendar day of aggregated sentiment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub mean_score: f64,
    pub count: usize,
}
