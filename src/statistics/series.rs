use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    core::{Bucket, HourlyReading, TimeWindow},
    statistics::{Metric, SumByBucket},
};

pub const MAX_POINTS: usize = 400;

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Series {
    pub bucket: Bucket,
    pub series: Vec<SeriesPoint>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Bucket start.
    pub x: DateTime<Utc>,

    pub y: f64,
}

/// Bucketed series of the metric, at most [`MAX_POINTS`] points.
///
/// The bucket is picked from the window span, the bucket of the window itself is ignored.
pub fn series(readings: &[HourlyReading], window: TimeWindow, metric: Metric) -> Series {
    let bucket = Bucket::choose_for_series(window.from, window.to);
    let series = metric
        .points(readings)
        .sum_by_bucket(bucket)
        .into_iter()
        .take(MAX_POINTS)
        .map(|(x, y)| SeriesPoint { x, y })
        .collect();
    Series { bucket, series }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use super::*;

    fn window(from: &str, days: i64) -> TimeWindow {
        let from = HourlyReading::fixture(from, 0.0, 0.0).timestamp;
        TimeWindow::new(from, from + TimeDelta::days(days), Bucket::Day)
    }

    #[test]
    fn hourly_for_short_windows() {
        let readings = [
            HourlyReading::fixture("2025-07-14T10:00:00Z", 1.0, 0.0),
            HourlyReading::fixture("2025-07-14T11:00:00Z", 2.0, 0.5),
        ];
        let series = series(&readings, window("2025-07-14", 1), Metric::Net);
        assert_eq!(series.bucket, Bucket::Hour);
        assert_eq!(series.series.len(), 2);
        assert_eq!(series.series[1].x, readings[1].timestamp);
        assert_abs_diff_eq!(series.series[1].y, 1.5);
    }

    #[test]
    fn daily_for_medium_windows() {
        let readings = [
            HourlyReading::fixture("2025-07-14T10:00:00Z", 1.0, 0.0),
            HourlyReading::fixture("2025-07-14T11:00:00Z", 2.0, 0.0),
            HourlyReading::fixture("2025-07-20T11:00:00Z", 4.0, 0.0),
        ];
        let series = series(&readings, window("2025-07-01", 31), Metric::Import);
        assert_eq!(series.bucket, Bucket::Day);
        assert_eq!(series.series.len(), 2);
        assert_abs_diff_eq!(series.series[0].y, 3.0);
    }

    #[test]
    fn capped_at_max_points() {
        let start = HourlyReading::fixture("2025-01-01", 0.0, 0.0).timestamp;
        let readings = (0..500)
            .map(|hour| HourlyReading::builder().timestamp(start + TimeDelta::hours(hour)).build())
            .collect::<Vec<_>>();
        let series = series(&readings, window("2025-01-01", 14), Metric::Import);
        assert_eq!(series.bucket, Bucket::Hour);
        assert_eq!(series.series.len(), MAX_POINTS);
        assert_eq!(series.series[0].x, start);
    }
}
