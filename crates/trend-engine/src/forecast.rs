use chrono::Duration;

use reputation_core::stats::linear_fit;
use reputation_core::DailyBucket;

use crate::ForecastPoint;

/// Most forecast points ever emitted, whatever the requested horizon
pub const MAX_FORECAST_POINTS: usize = 7;

/// Project daily mean scores forward with a least-squares line.
///
/// Projection starts one index past the fitted range; per-point confidence
/// is 1 minus |r squared| of the fit and dates continue from the last bucket.
pub(crate) fn project(buckets: &[DailyBucket], requested_days: usize) -> Vec<ForecastPoint> {
    if buckets.is_empty() {
        return Vec::new();
    }

    let scores: Vec<f64> = buckets.iter().map(|b| b.mean_score).collect();
    let fit = linear_fit(&scores);
    let confidence = (1.0 - fit.r_squared.abs()).clamp(0.0, 1.0);

    let n = scores.len();
    let last_date = buckets[n - 1].date;
    let horizon = requested_days.min(MAX_FORECAST_POINTS);

    (1..=horizon)
        .map(|i| ForecastPoint {
            date: last_date + Duration::days(i as i64),
            predicted_score: (fit.intercept + fit.slope * (n + i) as f64).clamp(0.0, 1.0),
            confidence,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn buckets_from(scores: &[f64]) -> Vec<DailyBucket> {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| DailyBucket {
                date: start + Duration::days(i as i64),
                mean_score: score,
                count: 1,
            })
            .collect()
    }

    #[test]
    fn test_projection_continues_from_last_bucket_date() {
        let buckets = buckets_from(&[0.4; 14]);
        let points = project(&buckets, 30);
        assert_eq!(points.len(), MAX_FORECAST_POINTS);
        assert_eq!(points[0].date, buckets[13].date + Duration::days(1));
        assert_eq!(points[6].date, buckets[13].date + Duration::days(7));
    }

    #[test]
    fn test_requested_horizon_below_cap() {
        let buckets = buckets_from(&[0.5; 14]);
        let points = project(&buckets, 3);
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_flat_series_projects_flat_with_collapsed_confidence() {
        let buckets = buckets_from(&[0.5; 14]);
        let points = project(&buckets, 30);
        assert!(points
            .iter()
            .all(|p| (p.predicted_score - 0.5).abs() < 1e-9));
        // A constant series is fully explained by its fit
        assert!(points.iter().all(|p| p.confidence.abs() < 1e-9));
    }

    #[test]
    fn test_predictions_stay_in_unit_range() {
        let rising: Vec<f64> = (0..14).map(|i| 0.3 + i as f64 * 0.05).collect();
        let buckets = buckets_from(&rising);
        let points = project(&buckets, 30);
        assert!(points
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.predicted_score)));
        assert_eq!(points.last().map(|p| p.predicted_score), Some(1.0));
    }
}
