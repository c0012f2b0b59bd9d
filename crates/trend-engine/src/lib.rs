//! Sentiment Trend Engine
//!
//! Turns the normalized event stream into direction, momentum, forecast,
//! seasonal patterns and volatility for the monitored company.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use utoipa::ToSchema;

use reputation_core::{bucket_daily, rolling_mean, Polarity, SentimentEvent};

mod forecast;

pub use forecast::MAX_FORECAST_POINTS;

/// Direction of the reputation trend over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    }
}

/// Period class a seasonal pattern refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Weekly,
    Monthly,
}

/// Strength of a detected seasonal deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Medium,
    High,
}

/// Recurring weekday or month whose sentiment sits away from neutral
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeasonalPattern {
    pub period_type: PeriodType,
    /// Human label for the period ("Monday", "Jan")
    pub period: String,
    pub score: f64,
    pub significance: Significance,
}

/// One projected day of sentiment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Projected mean score, clamped to the 0-1 scale
    pub predicted_score: f64,
    /// 1 minus |r squared| of the fit, shared by every point
    pub confidence: f64,
}

/// Complete trend analysis over the window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Smoothed recent level minus the older reference level
    pub momentum: f64,
    /// Latest 7-day smoothed daily score (raw daily mean until smoothing fills)
    pub recent_score: f64,
    /// Momentum relative to the older reference level, in percent
    pub change_percentage: f64,
    pub forecast: Vec<ForecastPoint>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    /// Population standard deviation of per-event scores in the window
    pub volatility: f64,
    /// Events that fell inside the analysis window
    pub sample_size: usize,
}

impl TrendResult {
    fn empty() -> Self {
        Self {
            direction: TrendDirection::Stable,
            momentum: 0.0,
            recent_score: 0.0,
            change_percentage: 0.0,
            forecast: Vec::new(),
            seasonal_patterns: Vec::new(),
            volatility: 0.0,
            sample_size: 0,
        }
    }
}

/// Policy constants for trend analysis
#[derive(Debug, Clone)]
pub struct TrendConfig {
    /// Analysis window ending at the reference instant, in days
    pub window_days: i64,
    /// Requested forecast horizon in days; at most `MAX_FORECAST_POINTS` emitted
    pub forecast_days: usize,
    /// |momentum| above which the direction leaves stable
    pub momentum_threshold: f64,
    /// Events required before momentum is computed
    pub min_events_for_momentum: usize,
    /// Events required before volatility is computed
    pub min_events_for_volatility: usize,
    /// Events required before seasonal patterns are reported
    pub min_events_for_seasonality: usize,
    /// Daily buckets required before a forecast is produced
    pub min_buckets_for_forecast: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            forecast_days: 30,
            momentum_threshold: 0.1,
            min_events_for_momentum: 7,
            min_events_for_volatility: 7,
            min_events_for_seasonality: 90,
            min_buckets_for_forecast: 14,
        }
    }
}

/// Trend analyzer over normalized sentiment events
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self {
            config: TrendConfig::default(),
        }
    }

    pub fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Analyze the trailing window ending now.
    pub fn analyze(&self, events: &[SentimentEvent]) -> TrendResult {
        self.analyze_at(events, Utc::now())
    }

    /// Analyze the window ending at a fixed reference instant.
    ///
    /// Always returns a result; thin or empty windows degrade to the
    /// neutral reading instead of failing.
    pub fn analyze_at(&self, events: &[SentimentEvent], now: DateTime<Utc>) -> TrendResult {
        let start = now - Duration::days(self.config.window_days);
        let mut window: Vec<SentimentEvent> = events
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= now)
            .copied()
            .collect();
        window.sort_by_key(|e| e.timestamp);

        if window.is_empty() {
            tracing::debug!(
                "No events inside the {}-day window",
                self.config.window_days
            );
            return TrendResult::empty();
        }

        let buckets = bucket_daily(&window);
        let scores: Vec<f64> = buckets.iter().map(|b| b.mean_score).collect();
        let rolling = rolling_mean(&scores, 7);

        let n = scores.len();
        let recent = rolling[n - 1].unwrap_or(scores[n - 1]);

        let (direction, momentum, change_percentage) =
            if window.len() < self.config.min_events_for_momentum {
                (TrendDirection::Stable, 0.0, 0.0)
            } else {
                // Compare the latest smoothed level against the level a week earlier
                let older = if n > 8 {
                    rolling[n - 8].unwrap_or(scores[n - 8])
                } else {
                    scores[0]
                };
                let momentum = recent - older;
                let direction = if momentum > self.config.momentum_threshold {
                    TrendDirection::Improving
                } else if momentum < -self.config.momentum_threshold {
                    TrendDirection::Declining
                } else {
                    TrendDirection::Stable
                };
                let change = if older > 0.0 {
                    momentum / older * 100.0
                } else {
                    0.0
                };
                (direction, momentum, change)
            };

        let seasonal_patterns = if window.len() >= self.config.min_events_for_seasonality {
            detect_seasonal_patterns(&window)
        } else {
            Vec::new()
        };

        let forecast = if buckets.len() >= self.config.min_buckets_for_forecast {
            forecast::project(&buckets, self.config.forecast_days)
        } else {
            Vec::new()
        };

        let volatility = if window.len() < self.config.min_events_for_volatility {
            0.0
        } else {
            let event_scores: Vec<f64> = window.iter().map(|e| e.score).collect();
            event_scores.as_slice().population_std_dev()
        };

        tracing::debug!(
            "Trend over {} events: {} (momentum {:.3})",
            window.len(),
            direction.as_str(),
            momentum
        );

        TrendResult {
            direction,
            momentum,
            recent_score: recent,
            change_percentage,
            forecast,
            seasonal_patterns,
            volatility,
            sample_size: window.len(),
        }
    }
}

const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Deviation from neutral that upgrades a pattern to high significance
const STRONG_PATTERN_DELTA: f64 = 0.2;

fn detect_seasonal_patterns(events: &[SentimentEvent]) -> Vec<SeasonalPattern> {
    let mut weekday_groups: [(f64, usize); 7] = [(0.0, 0); 7];
    let mut month_groups: [(f64, usize); 12] = [(0.0, 0); 12];

    for event in events {
        let weekday = event.timestamp.weekday().num_days_from_monday() as usize;
        weekday_groups[weekday].0 += event.score;
        weekday_groups[weekday].1 += 1;

        let month = event.timestamp.month() as usize - 1;
        month_groups[month].0 += event.score;
        month_groups[month].1 += 1;
    }

    let mut patterns = Vec::new();
    collect_patterns(
        &weekday_groups,
        &WEEKDAY_LABELS,
        PeriodType::Weekly,
        &mut patterns,
    );
    collect_patterns(
        &month_groups,
        &MONTH_LABELS,
        PeriodType::Monthly,
        &mut patterns,
    );
    patterns
}

fn collect_patterns(
    groups: &[(f64, usize)],
    labels: &[&str],
    period_type: PeriodType,
    out: &mut Vec<SeasonalPattern>,
) {
    for (idx, (sum, count)) in groups.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let score = sum / *count as f64;
        // Only periods whose mean leaves the neutral band are worth reporting
        if Polarity::from_score(score) == Polarity::Neutral {
            continue;
        }
        let significance = if (score - 0.5).abs() > STRONG_PATTERN_DELTA {
            Significance::High
        } else {
            Significance::Medium
        };
        out.push(SeasonalPattern {
            period_type,
            period: labels[idx].to_string(),
            score,
            significance,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reputation_core::EventKind;

    fn reference_time() -> DateTime<Utc> {
        // A Monday, so weekday-anchored fixtures stay predictable
        Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
    }

    fn event_days_ago(now: DateTime<Utc>, days: i64, score: f64) -> SentimentEvent {
        SentimentEvent {
            timestamp: now - Duration::days(days),
            score,
            weight: 0.8,
            kind: EventKind::Article,
        }
    }

    #[test]
    fn test_empty_events_yield_neutral_result() {
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&[], reference_time());
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.momentum, 0.0);
        assert_eq!(result.change_percentage, 0.0);
        assert!(result.forecast.is_empty());
        assert!(result.seasonal_patterns.is_empty());
        assert_eq!(result.volatility, 0.0);
        assert_eq!(result.sample_size, 0);
    }

    #[test]
    fn test_constant_series_is_stable_with_zero_volatility() {
        let now = reference_time();
        let events: Vec<SentimentEvent> =
            (0..30).map(|i| event_days_ago(now, i % 15, 0.5)).collect();
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&events, now);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.volatility, 0.0);
        assert!((result.recent_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_event_round_trips_recent_score() {
        let now = reference_time();
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&[event_days_ago(now, 0, 0.8)], now);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.momentum, 0.0);
        assert_eq!(result.recent_score, 0.8);
        assert_eq!(result.sample_size, 1);

        // Feeding the reported level back reproduces it
        let echoed = analyzer.analyze_at(&[event_days_ago(now, 0, result.recent_score)], now);
        assert_eq!(echoed.recent_score, 0.8);
        assert_eq!(Polarity::from_score(echoed.recent_score), Polarity::Positive);
    }

    #[test]
    fn test_two_week_climb_reads_improving() {
        let now = reference_time();
        let mut events = Vec::new();
        for d in 0..14i64 {
            let score = 0.2 + 0.6 * d as f64 / 13.0;
            events.push(event_days_ago(now, 13 - d, score));
        }
        // Duplicate a few busy days; bucket means stay on the same line
        for d in [2i64, 5, 8, 9, 11, 12] {
            let score = 0.2 + 0.6 * d as f64 / 13.0;
            events.push(event_days_ago(now, 13 - d, score));
        }
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&events, now);

        assert_eq!(result.sample_size, 20);
        assert_eq!(result.direction, TrendDirection::Improving);
        assert!(result.momentum > 0.1);
        assert!(result.change_percentage > 0.0);
        assert_eq!(result.forecast.len(), 7);
        assert!(result
            .forecast
            .windows(2)
            .all(|w| w[0].predicted_score <= w[1].predicted_score));
        assert!(result
            .forecast
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.predicted_score)));
    }

    #[test]
    fn test_two_week_slide_reads_declining() {
        let now = reference_time();
        let mut events = Vec::new();
        for d in 0..14i64 {
            let score = 0.8 - 0.6 * d as f64 / 13.0;
            events.push(event_days_ago(now, 13 - d, score));
        }
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&events, now);
        assert_eq!(result.direction, TrendDirection::Declining);
        assert!(result.momentum < -0.1);
        assert!(result.change_percentage < 0.0);
    }

    #[test]
    fn test_sparse_events_stay_stable() {
        let now = reference_time();
        let events: Vec<SentimentEvent> = (0..6)
            .map(|d| event_days_ago(now, d * 2, if d % 2 == 0 { 0.9 } else { 0.1 }))
            .collect();
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&events, now);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.momentum, 0.0);
        assert_eq!(result.volatility, 0.0);
        assert_eq!(result.sample_size, 6);
    }

    #[test]
    fn test_seasonal_patterns_need_ninety_events() {
        let now = reference_time();
        let mondays: Vec<SentimentEvent> = (0..90)
            .map(|i| event_days_ago(now, (i % 13) * 7, 0.9))
            .collect();
        let analyzer = TrendAnalyzer::new();

        let below = analyzer.analyze_at(&mondays[..89], now);
        assert!(below.seasonal_patterns.is_empty());

        let at_threshold = analyzer.analyze_at(&mondays, now);
        assert!(!at_threshold.seasonal_patterns.is_empty());
        assert!(at_threshold
            .seasonal_patterns
            .iter()
            .any(|p| p.period_type == PeriodType::Weekly && p.period == "Monday"));
        assert!(at_threshold
            .seasonal_patterns
            .iter()
            .all(|p| p.significance == Significance::High));
    }

    #[test]
    fn test_forecast_needs_fourteen_buckets() {
        let now = reference_time();
        let analyzer = TrendAnalyzer::new();

        let thirteen: Vec<SentimentEvent> =
            (0..13).map(|d| event_days_ago(now, d, 0.6)).collect();
        assert!(analyzer.analyze_at(&thirteen, now).forecast.is_empty());

        let fourteen: Vec<SentimentEvent> =
            (0..14).map(|d| event_days_ago(now, d, 0.6)).collect();
        assert_eq!(analyzer.analyze_at(&fourteen, now).forecast.len(), 7);
    }

    #[test]
    fn test_requested_forecast_days_cap_emission() {
        let now = reference_time();
        let events: Vec<SentimentEvent> =
            (0..20).map(|d| event_days_ago(now, d, 0.55)).collect();
        let analyzer = TrendAnalyzer::with_config(TrendConfig {
            forecast_days: 3,
            ..TrendConfig::default()
        });
        assert_eq!(analyzer.analyze_at(&events, now).forecast.len(), 3);
    }

    #[test]
    fn test_window_excludes_old_events() {
        let now = reference_time();
        let events = vec![event_days_ago(now, 120, 0.1), event_days_ago(now, 1, 0.9)];
        let analyzer = TrendAnalyzer::new();
        let result = analyzer.analyze_at(&events, now);
        assert_eq!(result.sample_size, 1);
        assert_eq!(result.recent_score, 0.9);
    }
}
