use chrono::TimeDelta;

use crate::core::{Bucket, HourlyReading, TimeWindow};

/// In-memory readings, ordered by time.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct ReadingStore(Vec<HourlyReading>);

impl From<Vec<HourlyReading>> for ReadingStore {
    fn from(mut readings: Vec<HourlyReading>) -> Self {
        readings.sort_by_key(|reading| reading.timestamp);
        Self(readings)
    }
}

impl ReadingStore {
    /// Readings within `[from, to)` of the window, ordered by time.
    #[must_use]
    pub fn window(&self, window: &TimeWindow) -> &[HourlyReading] {
        let start = self.0.partition_point(|reading| reading.timestamp < window.from);
        let len = self.0[start..].partition_point(|reading| window.contains(reading.timestamp));
        &self.0[start..start + len]
    }

    /// Month-bucketed window covering every reading, if any.
    #[must_use]
    pub fn span(&self) -> Option<TimeWindow> {
        let first = self.0.first()?;
        let last = self.0.last()?;
        Some(TimeWindow::new(first.timestamp, last.timestamp + TimeDelta::hours(1), Bucket::Month))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
