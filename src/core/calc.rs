use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::{Error, Result, sum::sum};

/// Deterministic arithmetic over plain values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Sum,
    Avg,
    Min,
    Max,

    /// `[old, new]` to `(new - old) / old`.
    PercentChange,
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "avg" | "average" | "mean" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "percent_change" | "percentchange" | "percent-change" => Ok(Self::PercentChange),
            _ => Err(Error::UnknownOperation(text.to_owned())),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::PercentChange => "percent_change",
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn apply(self, values: &[f64]) -> Result<f64> {
        match self {
            Self::PercentChange => {
                let [old, new] = values[..] else {
                    return Err(self.operands_error(2, values.len()));
                };
                Ok(percent_change(old, new))
            }
            _ if values.is_empty() => Err(self.operands_error(1, 0)),
            Self::Sum => Ok(sum(values.iter().copied())),
            Self::Avg => Ok(sum(values.iter().copied()) / values.len() as f64),
            Self::Min => Ok(values.iter().copied().map(OrderedFloat).min().map_or(f64::NAN, |min| min.0)),
            Self::Max => Ok(values.iter().copied().map(OrderedFloat).max().map_or(f64::NAN, |max| max.0)),
        }
    }

    const fn operands_error(self, required: usize, actual: usize) -> Error {
        Error::EmptyOperands { operation: self.name(), required, actual }
    }
}

/// Relative change, `0` for no change from zero and `+∞` for any change from zero.
fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        if new == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (new - old) / old
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResult {
    pub operation: Operation,
    pub result: f64,
    pub input_count: usize,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn parse_ok() -> Result {
        assert_eq!("percentChange".parse::<Operation>()?, Operation::PercentChange);
        assert_eq!(" AVG ".parse::<Operation>()?, Operation::Avg);
        assert_eq!("median".parse::<Operation>(), Err(Error::UnknownOperation("median".to_owned())));
        Ok(())
    }

    #[test]
    fn sum_ok() -> Result {
        assert_abs_diff_eq!(Operation::Sum.apply(&[0.1; 10])?, 1.0);
        Ok(())
    }

    #[test]
    fn avg_ok() -> Result {
        assert_abs_diff_eq!(Operation::Avg.apply(&[1.0, 2.0, 4.5])?, 2.5);
        Ok(())
    }

    #[test]
    fn min_max_ok() -> Result {
        let values = [3.0, -1.5, 7.25, 0.0];
        assert_abs_diff_eq!(Operation::Min.apply(&values)?, -1.5);
        assert_abs_diff_eq!(Operation::Max.apply(&values)?, 7.25);
        Ok(())
    }

    #[test]
    fn empty_fails() {
        assert_eq!(
            Operation::Sum.apply(&[]),
            Err(Error::EmptyOperands { operation: "sum", required: 1, actual: 0 }),
        );
    }

    #[test]
    fn percent_change_ok() -> Result {
        assert_abs_diff_eq!(Operation::PercentChange.apply(&[80.0, 100.0])?, 0.25);
        assert_abs_diff_eq!(Operation::PercentChange.apply(&[100.0, 80.0])?, -0.2);
        assert_abs_diff_eq!(Operation::PercentChange.apply(&[0.0, 0.0])?, 0.0);
        assert_eq!(Operation::PercentChange.apply(&[0.0, 5.0])?, f64::INFINITY);
        Ok(())
    }

    #[test]
    fn percent_change_needs_two_values() {
        assert_eq!(
            Operation::PercentChange.apply(&[1.0, 2.0, 3.0]),
            Err(Error::EmptyOperands { operation: "percent_change", required: 2, actual: 3 }),
        );
    }
}
