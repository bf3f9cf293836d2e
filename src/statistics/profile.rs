use chrono::Timelike;
use serde::Serialize;

use crate::{
    core::{HourlyReading, sum::CompensatedSum},
    statistics::Metric,
};

/// Mean of a metric at a UTC clock hour.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct HourMean {
    pub hour: u8,

    #[serde(rename = "v")]
    pub mean: f64,
}

/// Mean of the metric per UTC clock hour, only for the hours having readings.
///
/// Unlike the other aggregations, the net value here is export minus import.
#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn hour_of_day_profile(readings: &[HourlyReading], metric: Metric) -> Vec<HourMean> {
    let mut sums = [CompensatedSum::ZERO; 24];
    let mut counts = [0_usize; 24];
    for reading in readings {
        let hour = reading.timestamp.hour() as usize;
        sums[hour] += match metric {
            Metric::Net => -reading.net_import().0,
            _ => metric.of(reading),
        };
        counts[hour] += 1;
    }
    sums.into_iter()
        .zip(counts)
        .enumerate()
        .filter(|(_, (_, count))| *count != 0)
        .map(|(hour, (sum, count))| HourMean { hour: hour as u8, mean: sum.total() / count as f64 })
        .collect()
}
