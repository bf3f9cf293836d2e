use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::core::tariff::{DayOfWeek, TariffPeriod};

/// Wall-clock hour and day of week of an instant in a given zone.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LocalHour {
    /// `0..24`.
    pub hour: u8,

    pub day: DayOfWeek,
}

impl LocalHour {
    #[expect(clippy::cast_possible_truncation)]
    pub fn at(timestamp: DateTime<Utc>, timezone: Tz) -> Self {
        let local = timestamp.with_timezone(&timezone);
        Self { hour: local.hour() as u8, day: DayOfWeek::of(&local) }
    }
}

/// First period, in the given order, covering the local hour of the instant.
#[must_use]
pub fn match_period(
    timestamp: DateTime<Utc>,
    periods: &[TariffPeriod],
    timezone: Tz,
) -> Option<&TariffPeriod> {
    let local = LocalHour::at(timestamp, timezone);
    periods.iter().find(|period| period.covers(local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            tariff::{DaysOfWeek, HourRange},
            window::Timestamp,
        },
        quantity::rate::KilowattHourRate,
    };

    fn instant(text: &str) -> DateTime<Utc> {
        text.parse::<Timestamp>().unwrap().0
    }

    fn period(name: &str, start: u8, end: u8, days: DaysOfWeek) -> TariffPeriod {
        TariffPeriod::try_new()
            .name(name)
            .import_rate(KilowattHourRate::from(0.3))
            .hours(HourRange::new(start, end))
            .days(days)
            .call()
            .unwrap()
    }

    #[test]
    fn local_hour_ok() {
        // Monday in UTC, still Sunday evening in California:
        assert_eq!(
            LocalHour::at(instant("2025-07-14T03:00:00Z"), Tz::America__Los_Angeles),
            LocalHour { hour: 20, day: DayOfWeek::Sunday },
        );
        assert_eq!(
            LocalHour::at(instant("2025-07-14T03:00:00Z"), Tz::UTC),
            LocalHour { hour: 3, day: DayOfWeek::Monday },
        );
    }

    #[test]
    fn spring_forward_skips_the_hour() {
        let hours = ["2025-03-09T09:00:00Z", "2025-03-09T10:00:00Z"]
            .map(|text| LocalHour::at(instant(text), Tz::America__Los_Angeles).hour);
        assert_eq!(hours, [1, 3]);
    }

    #[test]
    fn fall_back_repeats_the_hour() {
        let hours = ["2025-11-02T08:00:00Z", "2025-11-02T09:00:00Z", "2025-11-02T10:00:00Z"]
            .map(|text| LocalHour::at(instant(text), Tz::America__Los_Angeles).hour);
        assert_eq!(hours, [1, 1, 2]);
    }

    #[test]
    fn match_period_ok() {
        let periods = [
            period("off-peak", 0, 16, DaysOfWeek::all()),
            period("peak", 16, 21, DaysOfWeek::all()),
            period("evening", 21, 24, DaysOfWeek::all()),
        ];
        let tz = Tz::America__Los_Angeles;

        // 16:00 PDT:
        let matched = match_period(instant("2025-07-14T23:00:00Z"), &periods, tz);
        assert_eq!(matched.map(|period| period.name.as_str()), Some("peak"));

        // 21:00 PDT:
        let matched = match_period(instant("2025-07-15T04:00:00Z"), &periods, tz);
        assert_eq!(matched.map(|period| period.name.as_str()), Some("evening"));
    }

    #[test]
    fn first_period_wins() {
        let periods = [
            period("weekend", 0, 24, DayOfWeek::Saturday | DayOfWeek::Sunday),
            period("always", 0, 24, DaysOfWeek::all()),
        ];
        let saturday = instant("2025-07-12T12:00:00Z");
        let monday = instant("2025-07-14T12:00:00Z");
        assert_eq!(match_period(saturday, &periods, Tz::UTC).map(|p| p.name.as_str()), Some("weekend"));
        assert_eq!(match_period(monday, &periods, Tz::UTC).map(|p| p.name.as_str()), Some("always"));
    }

    #[test]
    fn uncovered_hour_is_none() {
        let periods = [period("peak", 16, 21, DayOfWeek::Monday.into())];
        assert_eq!(match_period(instant("2025-07-14T10:00:00Z"), &periods, Tz::UTC), None);
        assert_eq!(match_period(instant("2025-07-15T17:00:00Z"), &periods, Tz::UTC), None);
    }
}
