use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    core::{Bucket, HourlyReading},
    statistics::{Metric, SumByBucket},
};

pub const DEFAULT_K: usize = 10;
pub const MAX_K: usize = 50;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DayTotal {
    /// Start of the UTC day.
    pub day: DateTime<Utc>,

    #[serde(rename = "v")]
    pub total: f64,
}

/// Days with the highest sums of the metric, at most [`MAX_K`].
///
/// Ties keep the chronological order.
#[must_use]
pub fn top_days(readings: &[HourlyReading], metric: Metric, k: usize) -> Vec<DayTotal> {
    metric
        .points(readings)
        .sum_by_bucket(Bucket::Day)
        .into_iter()
        .sorted_by_key(|(_, total)| Reverse(OrderedFloat(*total)))
        .take(k.min(MAX_K))
        .map(|(day, total)| DayTotal { day, total })
        .collect()
}
