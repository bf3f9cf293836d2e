//! Compensated summation.
//!
//! Every aggregate over hourly values goes through [`CompensatedSum`], so the rounding error
//! of a year of readings stays at the level of a single addition instead of growing with the
//! number of terms.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

/// Kahan–Babuška (Neumaier) running sum.
///
/// Partial sums computed over disjoint chunks may be combined with [`Add`] without losing
/// the compensation term.
#[must_use]
#[derive(Copy, Clone, Debug, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub const ZERO: Self = Self { sum: 0.0, compensation: 0.0 };

    pub fn push(&mut self, value: f64) {
        let sum = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - sum) + value;
        } else {
            self.compensation += (value - sum) + self.sum;
        }
        self.sum = sum;
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.sum + self.compensation
    }
}

impl AddAssign<f64> for CompensatedSum {
    fn add_assign(&mut self, value: f64) {
        self.push(value);
    }
}

impl Add for CompensatedSum {
    type Output = Self;

    /// Merge two partial sums.
    fn add(mut self, rhs: Self) -> Self::Output {
        self.push(rhs.sum);
        self.push(rhs.compensation);
        self
    }
}

impl Sum for CompensatedSum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::ZERO;
        sum.extend(iter);
        sum
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Sum the values with compensation. Empty input sums to zero.
#[must_use]
pub fn sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().collect::<CompensatedSum>().total()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_abs_diff_eq!(sum(std::iter::empty()), 0.0);
    }

    #[test]
    fn tenths_ok() {
        let naive = std::iter::repeat_n(0.1, 10).fold(0.0_f64, |sum, value| sum + value);
        assert!((naive - 1.0).abs() > 0.0);
        assert_abs_diff_eq!(sum(std::iter::repeat_n(0.1, 10)), 1.0, epsilon = f64::EPSILON);
    }

    #[test]
    fn beats_naive_summation() {
        let values = vec![0.01; 10_000];
        let expected = 100.0;

        let naive_error = (values.iter().fold(0.0_f64, |sum, value| sum + value) - expected).abs();
        let compensated_error = (sum(values.iter().copied()) - expected).abs();

        assert!(compensated_error / expected < 1e-9);
        assert!(compensated_error < naive_error, "{compensated_error} vs {naive_error}");
    }

    #[test]
    fn order_independent() {
        let values = (1..=8760).map(|hour| f64::from(hour % 24) * 0.137 + 1e-3).collect::<Vec<_>>();
        let forward = sum(values.iter().copied());
        let backward = sum(values.iter().rev().copied());
        assert_abs_diff_eq!(forward, backward, epsilon = 4.0 * forward * f64::EPSILON);
    }

    #[test]
    fn merged_chunks_match_sequential() {
        let values = (0..8760).map(|index| 0.01 + f64::from(index % 7) * 1e-4).collect::<Vec<_>>();
        let sequential = sum(values.iter().copied());
        let merged = values
            .chunks(730)
            .map(|chunk| chunk.iter().copied().collect::<CompensatedSum>())
            .sum::<CompensatedSum>()
            .total();
        assert_abs_diff_eq!(sequential, merged, epsilon = 4.0 * sequential * f64::EPSILON);
    }

    #[test]
    fn cancellation_ok() {
        assert_abs_diff_eq!(sum([1.0, 1e100, 1.0, -1e100]), 2.0);
    }
}
