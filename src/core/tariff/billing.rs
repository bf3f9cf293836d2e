use chrono_tz::Tz;

use crate::{
    core::{
        Error,
        Result,
        calendar::{days_between, days_in_month},
        window::TimeWindow,
    },
    quantity::cost::Cost,
};

/// Terms shared by every tariff type.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Billing {
    pub fixed_monthly_fee: Cost,
    pub prorate_fixed_fee: bool,
    pub currency: String,

    /// Zone of the local clock that time-of-use periods refer to.
    pub timezone: Tz,
}

impl Billing {
    pub fn try_new(
        fixed_monthly_fee: Cost,
        prorate_fixed_fee: bool,
        currency: String,
        timezone: Tz,
    ) -> Result<Self> {
        if fixed_monthly_fee.0.is_nan() || fixed_monthly_fee.0 < 0.0 {
            return Err(Error::NegativeFee(fixed_monthly_fee.0));
        }
        Ok(Self { fixed_monthly_fee, prorate_fixed_fee, currency, timezone })
    }

    /// Fixed fee charged for the window.
    ///
    /// Without proration, the whole monthly fee is charged on every call: callers must ask
    /// only once per billing period.
    pub fn fixed_fee(&self, window: &TimeWindow) -> Cost {
        if self.prorate_fixed_fee && self.fixed_monthly_fee > Cost::ZERO {
            prorate(self.fixed_monthly_fee, window)
        } else {
            self.fixed_monthly_fee
        }
    }
}

/// Day-weighted proration: every UTC date from the date of `from` up to the date of `to`
/// (exclusive) adds `fee / days in its month`.
///
/// A window within a single date is charged one share of that date.
pub fn prorate(monthly_fee: Cost, window: &TimeWindow) -> Cost {
    let share = |date| monthly_fee / f64::from(days_in_month(date));
    let mut days = days_between(window.from, window.to).peekable();
    if days.peek().is_none() {
        return share(window.from.date_naive());
    }
    days.map(share).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use super::*;
    use crate::core::window::{Bucket, Timestamp, WindowSpec};

    fn window(from: &str, to: &str, bucket: Bucket) -> TimeWindow {
        let from: Timestamp = from.parse().unwrap();
        let to: Timestamp = to.parse().unwrap();
        TimeWindow::new(from.0, to.0, bucket)
    }

    #[test]
    fn whole_month_sums_to_the_fee() {
        for bucket in [Bucket::Hour, Bucket::Day, Bucket::Month] {
            let fee = prorate(Cost::from(30.0), &window("2025-06-01", "2025-07-01", bucket));
            assert_abs_diff_eq!(fee.0, 30.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_day_is_one_share() {
        let fee = prorate(Cost::from(31.0), &window("2025-07-14", "2025-07-15", Bucket::Day));
        assert_abs_diff_eq!(fee.0, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn partial_day_is_one_share() {
        let window = window("2025-07-14T10:00:00Z", "2025-07-14T11:00:00Z", Bucket::Hour);
        assert_abs_diff_eq!(prorate(Cost::from(31.0), &window).0, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn day_not_starting_at_midnight_is_one_share() -> Result {
        let window = WindowSpec {
            from: Some("2025-07-14T13:00:00Z".parse()?),
            ..WindowSpec::default()
        }
        .resolve()?;
        assert_eq!(window.to - window.from, TimeDelta::days(1));
        assert_abs_diff_eq!(prorate(Cost::from(31.0), &window).0, 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn spans_months_with_their_own_lengths() {
        // Feb 27 and Feb 28 of 2025, then Mar 1:
        let fee = prorate(Cost::from(28.0 * 31.0), &window("2025-02-27", "2025-03-02", Bucket::Day));
        assert_abs_diff_eq!(fee.0, 2.0 * 31.0 + 28.0, epsilon = 1e-9);
    }

    #[test]
    fn year_sums_to_twelve_fees() {
        let window = window("2025-01-01", "2026-01-01", Bucket::Month);
        assert_abs_diff_eq!(prorate(Cost::from(12.5), &window).0, 150.0, epsilon = 1e-9);
        assert_eq!((window.to - window.from), TimeDelta::days(365));
    }

    #[test]
    fn flat_fee_without_proration() -> Result {
        let billing = Billing::try_new(Cost::from(10.0), false, "USD".to_owned(), Tz::UTC)?;
        let window = window("2025-07-14T10:00:00Z", "2025-07-14T11:00:00Z", Bucket::Hour);
        assert_abs_diff_eq!(billing.fixed_fee(&window).0, 10.0);
        Ok(())
    }

    #[test]
    fn negative_fee_fails() {
        assert_eq!(
            Billing::try_new(Cost::from(-1.0), true, "USD".to_owned(), Tz::UTC),
            Err(Error::NegativeFee(-1.0)),
        );
    }
}
