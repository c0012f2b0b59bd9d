use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{DailyBucket, SentimentEvent};

/// Aggregate events into per-day buckets (unweighted mean score), ascending by date.
pub fn bucket_daily(events: &[SentimentEvent]) -> Vec<DailyBucket> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for event in events {
        let entry = days.entry(event.date()).or_insert((0.0, 0));
        entry.0 += event.score;
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (sum, count))| DailyBucket {
            date,
            mean_score: sum / count as f64,
            count,
        })
        .collect()
}

/// Rolling mean aligned to the input: `None` until the window has filled.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                None
            } else {
                let sum: f64 = values[i + 1 - window..=i].iter().sum();
                Some(sum / window as f64)
            }
        })
        .collect()
}
