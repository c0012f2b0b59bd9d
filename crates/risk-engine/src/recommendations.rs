//! Recommendation rules for the risk result.
//!
//! Rules fire independently and every match is kept: score rules first,
//! then factor rules in declaration order. The list is never empty.

use crate::models::{RiskFactor, RiskFactorKind};

/// Composite above which the top-priority alert fires
const IMMEDIATE_RESPONSE_SCORE: f64 = 80.0;
/// Composite above which the elevated-risk notice fires
const ELEVATED_RISK_SCORE: f64 = 60.0;

const SENTIMENT_TREND_THRESHOLD: f64 = 0.6;
const VOLUME_VOLATILITY_THRESHOLD: f64 = 0.7;
const NEGATIVE_SPIKES_THRESHOLD: f64 = 0.8;
const REVIEW_DECLINE_THRESHOLD: f64 = 0.5;
const NEWS_IMPACT_THRESHOLD: f64 = 0.6;

pub(crate) fn build(score: f64, factors: &[RiskFactor]) -> Vec<String> {
    let mut recs = Vec::new();

    if score > IMMEDIATE_RESPONSE_SCORE {
        recs.push("Immediate response required: reputation risk is critical.".to_string());
    } else if score > ELEVATED_RISK_SCORE {
        recs.push(
            "Elevated reputation risk. Review recent coverage and prepare a response plan."
                .to_string(),
        );
    }

    for factor in factors {
        match factor.kind {
            RiskFactorKind::SentimentTrend if factor.raw_value > SENTIMENT_TREND_THRESHOLD => {
                recs.push(
                    "Sentiment is declining. Investigate the drivers behind recent negative coverage."
                        .to_string(),
                );
            }
            RiskFactorKind::VolumeVolatility if factor.raw_value > VOLUME_VOLATILITY_THRESHOLD => {
                recs.push("Mention volume is unstable. Watch for coverage spikes.".to_string());
            }
            RiskFactorKind::NegativeSpikes if factor.raw_value > NEGATIVE_SPIKES_THRESHOLD => {
                recs.push(
                    "Monitor negative PR closely; a poorly vetted negative story is circulating."
                        .to_string(),
                );
            }
            RiskFactorKind::ReviewDecline if factor.raw_value > REVIEW_DECLINE_THRESHOLD => {
                recs.push(
                    "Customer ratings are slipping. Engage with recent reviewer feedback."
                        .to_string(),
                );
            }
            RiskFactorKind::NewsImpact if factor.raw_value > NEWS_IMPACT_THRESHOLD => {
                recs.push(
                    "High-impact negative news detected. Consider proactive communications."
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    if recs.is_empty() {
        recs.push("Risk indicators are within normal ranges. Continue routine monitoring.".to_string());
    }

    recs
}
