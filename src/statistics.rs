//! Read-only aggregations over hourly readings.
//!
//! All buckets are UTC, and every sum is compensated.

pub mod monthly;
pub mod profile;
pub mod series;
pub mod summary;
pub mod top_days;
pub mod totals;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{Bucket, HourlyReading, sum::CompensatedSum};

/// Per-reading energy value to aggregate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Import,
    Export,

    /// Import minus export.
    Net,
}

impl Metric {
    #[must_use]
    pub fn of(self, reading: &HourlyReading) -> f64 {
        match self {
            Self::Import => reading.import.0,
            Self::Export => reading.export.0,
            Self::Net => reading.net_import().0,
        }
    }

    /// Timestamped metric values of the readings.
    pub fn points(
        self,
        readings: &[HourlyReading],
    ) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        readings.iter().map(move |reading| (reading.timestamp, self.of(reading)))
    }
}

impl<T> SumByBucket for T where T: ?Sized {}

pub trait SumByBucket {
    /// Sum the values per UTC bucket, ascending by the bucket start.
    #[must_use]
    fn sum_by_bucket(self, bucket: Bucket) -> BTreeMap<DateTime<Utc>, f64>
    where
        Self: Sized + Iterator<Item = (DateTime<Utc>, f64)>,
    {
        let mut sums = BTreeMap::<_, CompensatedSum>::new();
        for (timestamp, value) in self {
            *sums.entry(bucket.truncate(timestamp)).or_default() += value;
        }
        sums.into_iter().map(|(start, sum)| (start, sum.total())).collect()
    }
}
