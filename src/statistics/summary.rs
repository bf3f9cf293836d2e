use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    core::{Bucket, HourlyReading, sum::sum},
    statistics::{Metric, SumByBucket},
};

/// Summary statistics over the daily sums of a metric.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct DailySummary {
    /// Number of days with readings.
    pub n: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[expect(clippy::cast_precision_loss)]
pub fn daily_summary(readings: &[HourlyReading], metric: Metric) -> DailySummary {
    let daily = metric.points(readings).sum_by_bucket(Bucket::Day).into_values().collect_vec();
    let (min, max) = match daily.iter().copied().map(OrderedFloat).minmax() {
        MinMaxResult::NoElements => return DailySummary::default(),
        MinMaxResult::OneElement(value) => (value.0, value.0),
        MinMaxResult::MinMax(min, max) => (min.0, max.0),
    };
    let total = sum(daily.iter().copied());
    DailySummary {
        n: daily.len(),
        sum: Some(total),
        mean: Some(total / daily.len() as f64),
        min: Some(min),
        max: Some(max),
    }
}
