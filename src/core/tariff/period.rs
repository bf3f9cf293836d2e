use bon::bon;

use crate::{
    core::{
        Error,
        Result,
        matcher::LocalHour,
        tariff::{
            day::DaysOfWeek,
            hours::{HOURS_PER_DAY, HourRange},
        },
    },
    quantity::rate::KilowattHourRate,
};

/// Named time-of-use period with its own rates.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct TariffPeriod {
    pub name: String,
    pub import_rate: KilowattHourRate,

    /// Credit (usually negative) for exported energy.
    pub export_rate: KilowattHourRate,

    pub hours: HourRange,
    pub days: DaysOfWeek,
}

#[bon]
impl TariffPeriod {
    /// Validate and build a period. The export rate mirrors the import rate unless given.
    #[builder]
    pub fn try_new(
        #[builder(into)] name: String,
        import_rate: KilowattHourRate,
        export_rate: Option<KilowattHourRate>,
        hours: HourRange,
        #[builder(default = DaysOfWeek::all())] days: DaysOfWeek,
    ) -> Result<Self> {
        if import_rate.0.is_nan() || import_rate.0 < 0.0 {
            return Err(Error::NegativeRate {
                field: format!("`{name}` import rate"),
                value: import_rate.0,
            });
        }
        if hours.start >= hours.end || hours.end > HOURS_PER_DAY {
            return Err(Error::InvalidHourSpec {
                period: name,
                reason: format!("[{}, {}) is not a range within 0..=24", hours.start, hours.end),
            });
        }
        Ok(Self { name, import_rate, export_rate: export_rate.unwrap_or(-import_rate), hours, days })
    }

    /// Whether the period applies to the local clock hour.
    #[must_use]
    pub fn covers(&self, local: LocalHour) -> bool {
        self.days.contains(local.day) && self.hours.contains(local.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tariff::day::DayOfWeek;

    #[test]
    fn export_rate_mirrors_import() -> Result {
        let period = TariffPeriod::try_new()
            .name("peak")
            .import_rate(KilowattHourRate::from(0.4))
            .hours(HourRange::new(16, 21))
            .call()?;
        assert_eq!(period.export_rate, KilowattHourRate::from(-0.4));
        assert_eq!(period.days, DaysOfWeek::all());
        Ok(())
    }

    #[test]
    fn reversed_hours_fail() {
        let result = TariffPeriod::try_new()
            .name("peak")
            .import_rate(KilowattHourRate::from(0.4))
            .hours(HourRange::new(21, 16))
            .call();
        assert!(matches!(result, Err(Error::InvalidHourSpec { .. })));
    }

    #[test]
    fn negative_import_rate_fails() {
        let result = TariffPeriod::try_new()
            .name("peak")
            .import_rate(KilowattHourRate::from(-0.1))
            .hours(HourRange::new(0, 24))
            .call();
        assert!(matches!(result, Err(Error::NegativeRate { .. })));
    }

    #[test]
    fn covers_ok() -> Result {
        let period = TariffPeriod::try_new()
            .name("weekday peak")
            .import_rate(KilowattHourRate::from(0.5))
            .hours(HourRange::new(16, 21))
            .days(DayOfWeek::Monday | DayOfWeek::Friday)
            .call()?;
        assert!(period.covers(LocalHour { hour: 16, day: DayOfWeek::Monday }));
        assert!(!period.covers(LocalHour { hour: 21, day: DayOfWeek::Monday }));
        assert!(!period.covers(LocalHour { hour: 16, day: DayOfWeek::Sunday }));
        Ok(())
    }
}
