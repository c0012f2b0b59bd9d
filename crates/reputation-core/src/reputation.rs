use serde::{Deserialize, Serialize};

use crate::types::{Polarity, SentimentEvent};

/// Score reported while no mentions exist yet
pub const NEUTRAL_REPUTATION_SCORE: f64 = 50.0;

/// Aggregate reputation standing over a set of events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReputationSnapshot {
    /// Share of positive mentions, 0-100
    pub score: f64,
    pub total_mentions: usize,
    pub positive_mentions: usize,
    pub negative_mentions: usize,
    pub neutral_mentions: usize,
}

impl ReputationSnapshot {
    pub fn from_events(events: &[SentimentEvent]) -> Self {
        if events.is_empty() {
            return Self {
                score: NEUTRAL_REPUTATION_SCORE,
                total_mentions: 0,
                positive_mentions: 0,
                negative_mentions: 0,
                neutral_mentions: 0,
            };
        }

        let mut positive = 0;
        let mut negative = 0;
        let mut neutral = 0;
        for event in events {
            match event.polarity() {
                Polarity::Positive => positive += 1,
                Polarity::Negative => negative += 1,
                Polarity::Neutral => neutral += 1,
            }
        }

        Self {
            score: positive as f64 / events.len() as f64 * 100.0,
            total_mentions: events.len(),
            positive_mentions: positive,
            negative_mentions: negative,
            neutral_mentions: neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;
    use chrono::{TimeZone, Utc};

    fn event(score: f64) -> SentimentEvent {
        SentimentEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 0).unwrap(),
            score,
            weight: 0.9,
            kind: EventKind::Article,
        }
    }

    #[test]
    fn test_counts_sum_to_total() {
        let events = vec![event(0.9), event(0.9), event(0.5), event(0.1)];
        let snapshot = ReputationSnapshot::from_events(&events);
        assert_eq!(snapshot.total_mentions, 4);
        assert_eq!(
            snapshot.positive_mentions + snapshot.negative_mentions + snapshot.neutral_mentions,
            snapshot.total_mentions
        );
        assert_eq!(snapshot.positive_mentions, 2);
        assert!((snapshot.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_snapshot_is_neutral() {
        let snapshot = ReputationSnapshot::from_events(&[]);
        assert_eq!(snapshot.score, NEUTRAL_REPUTATION_SCORE);
        assert_eq!(snapshot.total_mentions, 0);
    }
}
