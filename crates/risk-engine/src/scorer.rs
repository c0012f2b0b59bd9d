//! Risk Scoring Engine
//!
//! Combines five independent sentiment risk signals into a weighted 0-100
//! composite with a severity tier and actionable recommendations.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use statrs::statistics::Statistics;

use reputation_core::stats::mean;
use reputation_core::{bucket_daily, EventKind, Polarity, SentimentEvent};

use crate::models::{FactorSeverity, RiskConfig, RiskFactor, RiskFactorKind, RiskResult, RiskTier};
use crate::recommendations;

/// Composite reported when the lookback window holds no events at all.
/// A fixed low-tier placeholder beats a misleadingly precise zero.
pub const INSUFFICIENT_DATA_SCORE: f64 = 25.0;

/// Points averaged at each end of the series for the trend factor
const TREND_WINDOW: usize = 3;

/// Scale applied to the oldest-vs-newest trend gap
const TREND_DECLINE_SCALE: f64 = 2.0;

/// Divisor normalizing the volume coefficient of variation
const VOLUME_CV_NORMALIZER: f64 = 3.0;

/// Amplifier applied to the least-vetted negative article
const SPIKE_AMPLIFIER: f64 = 1.5;

/// Risk analyzer over normalized sentiment events
pub struct RiskAnalyzer {
    config: RiskConfig,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAnalyzer {
    pub fn new() -> Self {
        Self {
            config: RiskConfig::default(),
        }
    }

    pub fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Score the trailing lookback window ending now.
    pub fn score(&self, events: &[SentimentEvent]) -> RiskResult {
        self.score_at(events, Utc::now())
    }

    /// Score the lookback window ending at a fixed reference instant.
    ///
    /// Always returns a result; an empty window yields the fixed
    /// insufficient-data placeholder instead of a zero-filled score.
    pub fn score_at(&self, events: &[SentimentEvent], now: DateTime<Utc>) -> RiskResult {
        let start = now - Duration::days(self.config.lookback_days);
        let mut window: Vec<SentimentEvent> = events
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= now)
            .copied()
            .collect();
        window.sort_by_key(|e| e.timestamp);

        if window.is_empty() {
            tracing::debug!(
                "No events inside the {}-day lookback",
                self.config.lookback_days
            );
            return self.insufficient_data_result();
        }

        let raw_values = [
            self.sentiment_trend(&window),
            self.volume_volatility(&window),
            self.negative_spikes(&window),
            self.review_decline(&window),
            self.news_impact(&window),
        ];

        let factors: Vec<RiskFactor> = RiskFactorKind::ALL
            .iter()
            .zip(raw_values)
            .map(|(&kind, raw_value)| RiskFactor {
                kind,
                raw_value,
                weight: self.config.weights.for_kind(kind),
                severity: if raw_value > self.config.severity_threshold {
                    FactorSeverity::High
                } else {
                    FactorSeverity::Low
                },
            })
            .collect();

        let score = (factors
            .iter()
            .map(|f| f.raw_value * f.weight)
            .sum::<f64>()
            * 100.0)
            .clamp(0.0, 100.0);
        let tier = RiskTier::from_score(score);
        let recommendations = recommendations::build(score, &factors);

        tracing::debug!(
            "Risk over {} events: {:.1} ({})",
            window.len(),
            score,
            tier.as_str()
        );

        RiskResult {
            score,
            tier,
            factors,
            recommendations,
            sample_size: window.len(),
        }
    }

    fn insufficient_data_result(&self) -> RiskResult {
        let factors = RiskFactorKind::ALL
            .iter()
            .map(|&kind| RiskFactor {
                kind,
                raw_value: 0.0,
                weight: self.config.weights.for_kind(kind),
                severity: FactorSeverity::Low,
            })
            .collect();

        RiskResult {
            score: INSUFFICIENT_DATA_SCORE,
            tier: RiskTier::from_score(INSUFFICIENT_DATA_SCORE),
            factors,
            recommendations: vec![
                "Insufficient recent data for a risk assessment. Continue routine monitoring."
                    .to_string(),
            ],
            sample_size: 0,
        }
    }

    /// Decline between the oldest and newest few scores of the combined series.
    /// Positive values mean sentiment has dropped over the window.
    fn sentiment_trend(&self, window: &[SentimentEvent]) -> f64 {
        let scores: Vec<f64> = window.iter().map(|e| e.score).collect();
        let take = scores.len().min(TREND_WINDOW);
        let oldest = mean(&scores[..take]);
        let newest = mean(&scores[scores.len() - take..]);
        ((oldest - newest) * TREND_DECLINE_SCALE).clamp(0.0, 1.0)
    }

    /// Coefficient of variation of daily mention counts
    fn volume_volatility(&self, window: &[SentimentEvent]) -> f64 {
        let buckets = bucket_daily(window);
        if buckets.len() < self.config.min_days_for_volume {
            return 0.0;
        }

        let counts: Vec<f64> = buckets.iter().map(|b| b.count as f64).collect();
        let mean_count = counts.as_slice().mean();
        if mean_count <= 0.0 {
            return 0.0;
        }
        let cv = counts.as_slice().population_std_dev() / mean_count;
        (cv / VOLUME_CV_NORMALIZER).clamp(0.0, 1.0)
    }

    /// Least-vetted negative article, amplified
    fn negative_spikes(&self, window: &[SentimentEvent]) -> f64 {
        let worst_gap = window
            .iter()
            .filter(|e| e.kind == EventKind::Article && e.polarity() == Polarity::Negative)
            .map(|e| 1.0 - e.weight)
            .fold(f64::NEG_INFINITY, f64::max);

        if worst_gap.is_finite() {
            (worst_gap * SPIKE_AMPLIFIER).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Mean score drop between the earliest and latest ISO week with reviews
    fn review_decline(&self, window: &[SentimentEvent]) -> f64 {
        let reviews: Vec<&SentimentEvent> = window
            .iter()
            .filter(|e| e.kind == EventKind::Review)
            .collect();
        if reviews.len() < self.config.min_reviews_for_decline {
            return 0.0;
        }

        // Key weeks as iso_year * 100 + week so year boundaries keep sorting
        let mut weeks: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for review in &reviews {
            let iso = review.timestamp.iso_week();
            let key = iso.year() as u32 * 100 + iso.week();
            let entry = weeks.entry(key).or_insert((0.0, 0));
            entry.0 += review.score;
            entry.1 += 1;
        }

        let week_means: Vec<f64> = weeks
            .values()
            .map(|(sum, count)| sum / *count as f64)
            .collect();
        let earliest = week_means[0];
        let latest = week_means[week_means.len() - 1];
        (earliest - latest).clamp(0.0, 1.0)
    }

    /// Confidence-weighted pressure from negative news coverage
    fn news_impact(&self, window: &[SentimentEvent]) -> f64 {
        let impacts: Vec<f64> = window
            .iter()
            .filter(|e| e.kind == EventKind::Article)
            .map(|e| {
                let sign = match e.polarity() {
                    Polarity::Negative => 1.0,
                    Polarity::Positive => -0.5,
                    Polarity::Neutral => 0.0,
                };
                e.weight * sign
            })
            .collect();

        if impacts.is_empty() {
            return 0.0;
        }
        mean(&impacts).clamp(0.0, 1.0)
    }
}
