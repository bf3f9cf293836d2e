//! UTC calendar arithmetic that never fails.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0) && ((year % 100 != 0) || (year % 400 == 0))
}

#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 if is_leap_year(date.year()) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

#[must_use]
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Days::new(u64::from(days_in_month(date)))
}

/// UTC midnight of the date.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// UTC calendar dates from the date of `start` up to, but excluding, the date of `end`.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let end = end.date_naive();
    start.date_naive().iter_days().take_while(move |date| *date < end)
}
