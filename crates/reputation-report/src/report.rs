use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reputation_core::{ReputationSnapshot, SentimentEvent};
use risk_engine::{RiskAnalyzer, RiskConfig, RiskResult};
use trend_engine::{TrendAnalyzer, TrendConfig, TrendResult};

use crate::narrative::{describe_risk, describe_trend};

/// Complete reputation assessment for one company at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationReport {
    pub company: String,
    pub generated_at: DateTime<Utc>,
    /// Trend analysis window, in days
    pub window_days: i64,
    /// Risk lookback window, in days
    pub lookback_days: i64,
    pub reputation: ReputationSnapshot,
    pub trend: TrendResult,
    pub risk: RiskResult,
    pub trend_summary: String,
    pub risk_summary: String,
}

/// Runs both engines, the snapshot and the narratives over one event stream
pub struct ReportBuilder {
    company: String,
    trend_config: TrendConfig,
    risk_config: RiskConfig,
    reference_time: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    pub fn new(company: &str) -> Self {
        Self {
            company: company.to_string(),
            trend_config: TrendConfig::default(),
            risk_config: RiskConfig::default(),
            reference_time: None,
        }
    }

    pub fn with_trend_config(mut self, config: TrendConfig) -> Self {
        self.trend_config = config;
        self
    }

    pub fn with_risk_config(mut self, config: RiskConfig) -> Self {
        self.risk_config = config;
        self
    }

    /// Pin the reference instant; the report becomes fully deterministic.
    pub fn at(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn build(self, events: &[SentimentEvent]) -> ReputationReport {
        let now = self.reference_time.unwrap_or_else(Utc::now);
        let window_days = self.trend_config.window_days;
        let lookback_days = self.risk_config.lookback_days;

        let reputation = ReputationSnapshot::from_events(events);
        let trend = TrendAnalyzer::with_config(self.trend_config).analyze_at(events, now);
        let risk = RiskAnalyzer::with_config(self.risk_config).score_at(events, now);
        let trend_summary = describe_trend(&trend);
        let risk_summary = describe_risk(&risk);

        tracing::info!(
            "Report for {}: trend {}, risk {:.1} ({})",
            self.company,
            trend.direction.as_str(),
            risk.score,
            risk.tier.as_str()
        );

        ReputationReport {
            company: self.company,
            generated_at: now,
            window_days,
            lookback_days,
            reputation,
            trend,
            risk,
            trend_summary,
            risk_summary,
        }
    }
}
