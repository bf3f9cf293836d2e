//! Time window resolution.

use std::{
    fmt::{Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{
        Error,
        Result,
        calendar::{first_of_month, first_of_next_month, start_of_day},
    },
    ops::Interval,
};

const DAY: TimeDelta = TimeDelta::days(1);
const HOUR: TimeDelta = TimeDelta::hours(1);
const YEARS: RangeInclusive<i32> = 1..=9999;

/// Aggregation granularity.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Hour,

    #[default]
    Day,

    Month,
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hour => write!(f, "hour"),
            Self::Day => write!(f, "day"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl Bucket {
    /// Start of the UTC bucket containing the timestamp.
    #[must_use]
    pub fn truncate(self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let date = timestamp.date_naive();
        match self {
            Self::Hour => start_of_day(date) + TimeDelta::hours(i64::from(timestamp.hour())),
            Self::Day => start_of_day(date),
            Self::Month => start_of_day(first_of_month(date)),
        }
    }

    /// Bucket for plotting a time series between the two instants.
    ///
    /// The thresholds differ from the bucket inference of [`WindowSpec::resolve`].
    pub fn choose_for_series(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        let days = ceil_days(to - from).max(1);
        if days <= 14 {
            Self::Hour
        } else if days <= 500 {
            Self::Day
        } else {
            Self::Month
        }
    }

    /// Bucket inferred from an explicit `[from, to)` span when the caller gave no hint.
    fn infer_for_span(span: TimeDelta) -> Self {
        let days = ceil_days(span);
        if days <= 1 {
            Self::Hour
        } else if days <= 60 {
            Self::Day
        } else {
            Self::Month
        }
    }
}

/// Number of started days in the span, never negative.
fn ceil_days(span: TimeDelta) -> i64 {
    let milliseconds = span.num_milliseconds().max(0);
    let day = DAY.num_milliseconds();
    (milliseconds + day - 1) / day
}

/// UTC instant parsed leniently from ISO-8601 text.
///
/// Text without an offset (`2025-07-14`, `2025-07-14T10:00`) is read as UTC. Only four-digit
/// years are accepted, so that window arithmetic never leaves the representable range.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Timestamp(pub DateTime<Utc>);

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        const NAIVE_FORMATS: [&str; 4] =
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

        let text = text.trim();
        let timestamp = DateTime::parse_from_rfc3339(text)
            .map(|timestamp| timestamp.to_utc())
            .ok()
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .map(|timestamp| timestamp.and_utc())
            })
            .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(start_of_day))
            .filter(|timestamp| YEARS.contains(&timestamp.year()))
            .ok_or_else(|| Error::InvalidTimestamp(text.to_owned()))?;
        Ok(Self(timestamp))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
    }
}

/// Loose window specification as supplied by a caller.
#[serde_as]
#[must_use]
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct WindowSpec {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Timestamp>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
}

impl WindowSpec {
    /// Resolve the specification into a half-open UTC window.
    ///
    /// - `date` alone: the hour starting at `date`, its UTC month, or (by default) its UTC day.
    /// - `from` alone: the hour or the day starting at `from`, or the UTC month containing it.
    /// - `from` and `to`: taken as is, except that a non-positive span becomes one day.
    ///   Without a bucket hint, the bucket is inferred from the span.
    pub fn resolve(&self) -> Result<TimeWindow> {
        let bucket = self.bucket.unwrap_or_default();
        match (self.date, self.from, self.to) {
            (Some(Timestamp(date)), None, None) => Ok(match bucket {
                Bucket::Hour => TimeWindow::new(date, date + HOUR, Bucket::Hour),
                Bucket::Day => {
                    let from = Bucket::Day.truncate(date);
                    TimeWindow::new(from, from + DAY, Bucket::Day)
                }
                Bucket::Month => TimeWindow::month_of(date),
            }),

            (_, Some(Timestamp(from)), None) => Ok(match bucket {
                Bucket::Hour => TimeWindow::new(from, from + HOUR, Bucket::Hour),
                Bucket::Day => TimeWindow::new(from, from + DAY, Bucket::Day),
                Bucket::Month => TimeWindow::month_of(from),
            }),

            (_, Some(Timestamp(from)), Some(Timestamp(to))) => {
                let to = if to > from { to } else { from + DAY };
                let bucket = self.bucket.unwrap_or_else(|| Bucket::infer_for_span(to - from));
                Ok(TimeWindow::new(from, to, bucket))
            }

            _ => Err(Error::InvalidWindowSpec),
        }
    }
}

/// Resolved half-open UTC window `[from, to)`.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TimeWindow {
    /// Inclusive.
    pub from: DateTime<Utc>,

    /// Exclusive.
    pub to: DateTime<Utc>,

    pub bucket: Bucket,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, bucket: Bucket) -> Self {
        debug_assert!(to > from, "empty window: {from}..{to}");
        Self { from, to, bucket }
    }

    /// UTC calendar month containing the timestamp.
    pub fn month_of(timestamp: DateTime<Utc>) -> Self {
        let date = timestamp.date_naive();
        Self::new(
            start_of_day(first_of_month(date)),
            start_of_day(first_of_next_month(date)),
            Bucket::Month,
        )
    }

    pub const fn interval(self) -> Interval {
        Interval::new(self.from, self.to)
    }

    #[must_use]
    pub fn contains(self, timestamp: DateTime<Utc>) -> bool {
        self.interval().contains(timestamp)
    }
}
