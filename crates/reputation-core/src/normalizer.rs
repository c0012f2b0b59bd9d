//! Event Normalizer
//!
//! Collapses the collectors' heterogeneous article and review records into
//! the single sentiment event stream the analysis engines consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::types::{EventKind, SentimentEvent, SentimentLabel};

/// Fixed weight carried by review events
pub const REVIEW_WEIGHT: f64 = 0.8;

/// Weight assumed when an article arrives without classifier confidence
pub const DEFAULT_ARTICLE_CONFIDENCE: f64 = 0.0;

/// Raw article record as supplied by the news collectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub published_at: Option<DateTime<Utc>>,
    /// Classifier label ("positive" / "neutral" / "negative")
    pub sentiment: Option<String>,
    /// Classifier confidence, 0-1
    pub confidence: Option<f64>,
}

/// Raw review record as supplied by the review collectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Star rating on the 1-5 scale
    pub rating: Option<f64>,
}

/// Heterogeneous collector output, tagged by source kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawRecord {
    Article(ArticleRecord),
    Review(ReviewRecord),
}

impl TryFrom<&RawRecord> for SentimentEvent {
    type Error = RecordError;

    fn try_from(record: &RawRecord) -> Result<Self, Self::Error> {
        match record {
            RawRecord::Article(article) => {
                let timestamp = article.published_at.ok_or(RecordError::MissingTimestamp)?;
                let score = article
                    .sentiment
                    .as_deref()
                    .and_then(SentimentLabel::parse)
                    .unwrap_or(SentimentLabel::Neutral)
                    .to_score();
                let weight = match article.confidence {
                    Some(c) if !(0.0..=1.0).contains(&c) => {
                        return Err(RecordError::ConfidenceOutOfRange(c));
                    }
                    Some(c) => c,
                    None => DEFAULT_ARTICLE_CONFIDENCE,
                };
                Ok(SentimentEvent {
                    timestamp,
                    score,
                    weight,
                    kind: EventKind::Article,
                })
            }
            RawRecord::Review(review) => {
                let timestamp = review.reviewed_at.ok_or(RecordError::MissingTimestamp)?;
                let rating = review.rating.ok_or(RecordError::MissingRating)?;
                if !(1.0..=5.0).contains(&rating) {
                    return Err(RecordError::RatingOutOfRange(rating));
                }
                Ok(SentimentEvent {
                    timestamp,
                    score: rating / 5.0,
                    weight: REVIEW_WEIGHT,
                    kind: EventKind::Review,
                })
            }
        }
    }
}

/// Normalize raw collector records into a time-ordered event stream.
///
/// Malformed records are skipped one by one; a bad record never discards
/// the batch. The result is stably sorted ascending by timestamp.
pub fn normalize(records: &[RawRecord]) -> Vec<SentimentEvent> {
    let mut events: Vec<SentimentEvent> = Vec::with_capacity(records.len());
    for record in records {
        match SentimentEvent::try_from(record) {
            Ok(event) => events.push(event),
            Err(err) => tracing::debug!("Skipping record: {}", err),
        }
    }
    events.sort_by_key(|e| e.timestamp);
    tracing::debug!("Normalized {} of {} records", events.len(), records.len());
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(
        ts: Option<DateTime<Utc>>,
        sentiment: Option<&str>,
        confidence: Option<f64>,
    ) -> RawRecord {
        RawRecord::Article(ArticleRecord {
            published_at: ts,
            sentiment: sentiment.map(|s| s.to_string()),
            confidence,
        })
    }

    fn review(ts: Option<DateTime<Utc>>, rating: Option<f64>) -> RawRecord {
        RawRecord::Review(ReviewRecord {
            reviewed_at: ts,
            rating,
        })
    }

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_rating_maps_to_exact_score() {
        for rating in 1..=5 {
            let events = normalize(&[review(Some(ts(1)), Some(rating as f64))]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].score, rating as f64 / 5.0);
            assert_eq!(events[0].weight, REVIEW_WEIGHT);
            assert_eq!(events[0].kind, EventKind::Review);
        }
    }

    #[test]
    fn test_article_label_mapping() {
        let events = normalize(&[
            article(Some(ts(1)), Some("POSITIVE"), Some(0.9)),
            article(Some(ts(2)), Some("negative"), Some(0.7)),
            article(Some(ts(3)), Some("somewhat ok"), Some(0.5)),
            article(Some(ts(4)), None, Some(0.5)),
        ]);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].score, 1.0);
        assert_eq!(events[1].score, 0.0);
        // Unknown or missing labels read as neutral
        assert_eq!(events[2].score, 0.5);
        assert_eq!(events[3].score, 0.5);
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let events = normalize(&[article(Some(ts(1)), Some("positive"), None)]);
        assert_eq!(events[0].weight, DEFAULT_ARTICLE_CONFIDENCE);
    }

    #[test]
    fn test_malformed_records_skipped_not_fatal() {
        let records = vec![
            article(None, Some("positive"), Some(0.9)),
            review(Some(ts(2)), Some(0.0)),
            review(Some(ts(3)), Some(6.0)),
            review(Some(ts(4)), None),
            article(Some(ts(5)), Some("negative"), Some(1.5)),
            review(Some(ts(6)), Some(4.0)),
        ];
        let events = normalize(&records);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].score, 0.8);
    }

    #[test]
    fn test_output_sorted_by_timestamp() {
        let events = normalize(&[
            review(Some(ts(9)), Some(3.0)),
            article(Some(ts(2)), Some("positive"), Some(0.8)),
            review(Some(ts(5)), Some(1.0)),
        ]);
        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_rejection_reason_via_try_from() {
        let record = review(Some(ts(1)), Some(7.0));
        let err = SentimentEvent::try_from(&record).unwrap_err();
        assert_eq!(err, RecordError::RatingOutOfRange(7.0));
    }

    #[test]
    fn test_collector_payload_parses() {
        let payload = r#"[
            {"kind": "article", "published_at": "2024-03-01T09:30:00Z", "sentiment": "negative", "confidence": 0.82},
            {"kind": "review", "reviewed_at": "2024-03-02T14:00:00Z", "rating": 4}
        ]"#;
        let records: Vec<RawRecord> = serde_json::from_str(payload).unwrap();
        let events = normalize(&records);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Article);
        assert_eq!(events[0].score, 0.0);
        assert_eq!(events[1].score, 0.8);
    }
}
