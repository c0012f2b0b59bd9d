//! Narrative rendering for analysis results.
//!
//! Deterministic sentence templates derived from the result values alone,
//! so a summary can be regenerated from a stored result at any time.

use reputation_core::stats::mean;
use risk_engine::{FactorSeverity, RiskResult};
use trend_engine::{TrendDirection, TrendResult};

/// Volatility above this reads high
const HIGH_VOLATILITY: f64 = 0.2;
/// Volatility above this reads moderate
const MODERATE_VOLATILITY: f64 = 0.1;

/// Mean forecast score above which the outlook reads positive
const POSITIVE_OUTLOOK: f64 = 0.6;
/// Mean forecast score below which the outlook reads negative
const NEGATIVE_OUTLOOK: f64 = 0.4;

/// Render a plain-language narrative from an analysis result
pub trait Summarize {
    fn summarize(&self) -> String;
}

impl Summarize for TrendResult {
    fn summarize(&self) -> String {
        describe_trend(self)
    }
}

impl Summarize for RiskResult {
    fn summarize(&self) -> String {
        describe_risk(self)
    }
}

/// Narrate trend direction, volatility and the forecast outlook.
pub fn describe_trend(result: &TrendResult) -> String {
    let mut summary = match result.direction {
        TrendDirection::Improving => format!(
            "Reputation is improving with a momentum of {:.2}%. ",
            result.momentum * 100.0
        ),
        TrendDirection::Declining => format!(
            "Reputation is declining with a momentum of {:.2}%. ",
            result.momentum.abs() * 100.0
        ),
        TrendDirection::Stable => "Reputation trend is stable. ".to_string(),
    };

    if result.volatility > HIGH_VOLATILITY {
        summary.push_str("High volatility detected in sentiment scores. ");
    } else if result.volatility > MODERATE_VOLATILITY {
        summary.push_str("Moderate volatility in sentiment scores. ");
    } else {
        summary.push_str("Low volatility in sentiment scores. ");
    }

    if !result.forecast.is_empty() {
        let predicted: Vec<f64> = result.forecast.iter().map(|p| p.predicted_score).collect();
        let outlook = mean(&predicted);
        if outlook > POSITIVE_OUTLOOK {
            summary.push_str("Positive sentiment expected in the coming days.");
        } else if outlook < NEGATIVE_OUTLOOK {
            summary.push_str("Negative sentiment expected in the coming days.");
        } else {
            summary.push_str("Neutral sentiment expected in the coming days.");
        }
    }

    summary
}

/// Narrate the risk tier, its dominant factors and the matching action cue.
pub fn describe_risk(result: &RiskResult) -> String {
    let mut summary = format!(
        "Reputation risk is {} with a score of {:.0} out of 100. ",
        result.tier.as_str(),
        result.score
    );

    let drivers: Vec<&'static str> = result
        .factors
        .iter()
        .filter(|f| f.severity == FactorSeverity::High)
        .map(|f| f.kind.display_name())
        .collect();

    if drivers.is_empty() {
        summary.push_str("No single factor dominates the risk profile. ");
    } else {
        summary.push_str(&format!("Key drivers: {}. ", drivers.join(", ")));
    }

    summary.push_str(result.tier.guidance());
    summary
}
