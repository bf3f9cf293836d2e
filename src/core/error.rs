use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures of the tariff and cost engine.
///
/// All of them are recoverable by the caller: the engine never logs them, it only classifies.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("provide a `date` or a `from` (optionally with `to`)")]
    InvalidWindowSpec,

    #[error("invalid timestamp `{0}`, expected ISO-8601")]
    InvalidTimestamp(String),

    #[error("period `{period}` has invalid hours: {reason}")]
    InvalidHourSpec { period: String, reason: String },

    #[error("period `{period}` has invalid day of week {day}, expected 0 (Sunday) to 6 (Saturday)")]
    InvalidDayOfWeek { period: String, day: u8 },

    #[error("time-of-use overlap at hour {hour}: `{period}` conflicts with `{claimed_by}`")]
    OverlappingPeriods { hour: u8, period: String, claimed_by: String },

    #[error("flat tariff requires `rateImport` (or provide time-of-use periods)")]
    MissingFlatRate,

    #[error("unknown tariff type `{0}`, use `flat` or `tou`")]
    UnknownTariffType(String),

    #[error("time-of-use tariff requires at least one period")]
    EmptyPeriods,

    #[error("{field} must not be negative, got {value}")]
    NegativeRate { field: String, value: f64 },

    #[error("fixed monthly fee must not be negative, got {0}")]
    NegativeFee(f64),

    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    #[error(
        "no time-of-use period matched {timestamp} (local hour {hour}, day of week {day_of_week}), \
         verify the timezone and the coverage"
    )]
    UnmatchedPeriod { timestamp: DateTime<Utc>, hour: u8, day_of_week: u8 },

    #[error("`{operation}` requires {required} value(s), got {actual}")]
    EmptyOperands { operation: &'static str, required: usize, actual: usize },

    #[error("unknown operation `{0}`, use `sum`, `avg`, `min`, `max` or `percent_change`")]
    UnknownOperation(String),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
