use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The five independent signals feeding the composite risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    SentimentTrend,
    VolumeVolatility,
    NegativeSpikes,
    ReviewDecline,
    NewsImpact,
}

impl RiskFactorKind {
    /// Declaration order; factor output and recommendation rules follow it
    pub const ALL: [RiskFactorKind; 5] = [
        RiskFactorKind::SentimentTrend,
        RiskFactorKind::VolumeVolatility,
        RiskFactorKind::NegativeSpikes,
        RiskFactorKind::ReviewDecline,
        RiskFactorKind::NewsImpact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactorKind::SentimentTrend => "sentiment_trend",
            RiskFactorKind::VolumeVolatility => "volume_volatility",
            RiskFactorKind::NegativeSpikes => "negative_spikes",
            RiskFactorKind::ReviewDecline => "review_decline",
            RiskFactorKind::NewsImpact => "news_impact",
        }
    }

    /// Human label used in narratives
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskFactorKind::SentimentTrend => "sentiment trend",
            RiskFactorKind::VolumeVolatility => "volume volatility",
            RiskFactorKind::NegativeSpikes => "negative spikes",
            RiskFactorKind::ReviewDecline => "review decline",
            RiskFactorKind::NewsImpact => "news impact",
        }
    }
}

/// Severity of a single factor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactorSeverity {
    Low,
    High,
}

impl FactorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorSeverity::Low => "low",
            FactorSeverity::High => "high",
        }
    }
}

/// Severity tier derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 30.0 => RiskTier::Low,
            s if s < 60.0 => RiskTier::Medium,
            s if s < 80.0 => RiskTier::High,
            _ => RiskTier::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }

    /// Action cue matching the tier
    pub fn guidance(&self) -> &'static str {
        match self {
            RiskTier::Low => "No immediate action needed - maintain routine monitoring.",
            RiskTier::Medium => "Keep a closer watch on key coverage channels.",
            RiskTier::High => "Prepare a response plan and brief stakeholders.",
            RiskTier::Critical => "Activate the crisis communication plan immediately.",
        }
    }
}

/// One computed risk signal and its contribution weight
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskFactor {
    pub kind: RiskFactorKind,
    /// Signal strength before weighting, 0-1
    pub raw_value: f64,
    pub weight: f64,
    pub severity: FactorSeverity,
}

/// Composite risk assessment over the lookback window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskResult {
    /// Weighted composite, 0-100
    pub score: f64,
    pub tier: RiskTier,
    /// Always in `RiskFactorKind::ALL` order
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    /// Events that fell inside the lookback window
    pub sample_size: usize,
}

/// Contribution of each factor to the composite; the weights sum to 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    pub sentiment_trend: f64,
    pub volume_volatility: f64,
    pub negative_spikes: f64,
    pub review_decline: f64,
    pub news_impact: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            sentiment_trend: 0.25,
            volume_volatility: 0.20,
            negative_spikes: 0.20,
            review_decline: 0.15,
            news_impact: 0.20,
        }
    }
}

impl RiskWeights {
    pub fn for_kind(&self, kind: RiskFactorKind) -> f64 {
        match kind {
            RiskFactorKind::SentimentTrend => self.sentiment_trend,
            RiskFactorKind::VolumeVolatility => self.volume_volatility,
            RiskFactorKind::NegativeSpikes => self.negative_spikes,
            RiskFactorKind::ReviewDecline => self.review_decline,
            RiskFactorKind::NewsImpact => self.news_impact,
        }
    }
}

/// Policy constants for risk scoring
#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Lookback window ending at the reference instant, in days
    pub lookback_days: i64,
    pub weights: RiskWeights,
    /// Raw factor value above which the factor reads high severity
    pub severity_threshold: f64,
    /// Review events required before review decline is measured
    pub min_reviews_for_decline: usize,
    /// Distinct active days required before volume volatility is measured
    pub min_days_for_volume: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            weights: RiskWeights::default(),
            severity_threshold: 0.6,
            min_reviews_for_decline: 5,
            min_days_for_volume: 3,
        }
    }
}
