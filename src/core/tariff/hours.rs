use itertools::Itertools;

use crate::ops::RangeExclusive;

/// Local clock hours `[start, end)` within `0..=24`.
pub type HourRange = RangeExclusive<u8>;

pub const HOURS_PER_DAY: u8 = 24;

/// Compress a loose hour specification into disjoint `[start, end)` ranges.
///
/// After deduplication and sorting, exactly two values are read as a `[start, end)` pair.
/// Anything else is a set of discrete hour slots (`24` is dropped), merged into maximal runs.
/// Runs never wrap around midnight: `{22, 23, 0, 1}` yields `[0, 2)` and `[22, 24)`.
#[must_use]
pub fn compress(hours: &[u8]) -> Vec<HourRange> {
    let hours = hours.iter().copied().sorted_unstable().dedup().collect_vec();

    if let [start, end] = hours[..]
        && end > start
    {
        return vec![HourRange::new(start, end)];
    }

    let mut ranges: Vec<HourRange> = Vec::new();
    for hour in hours.into_iter().filter(|hour| *hour < HOURS_PER_DAY) {
        match ranges.last_mut() {
            Some(range) if range.end == hour => range.end += 1,
            _ => ranges.push(HourRange::new(hour, hour + 1)),
        }
    }
    ranges
}
