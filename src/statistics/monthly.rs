use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    core::{Bucket, HourlyReading, sum::CompensatedSum},
    quantity::energy::KilowattHours,
};

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct MonthlyImportExport {
    pub metric: &'static str,
    pub bucket: Bucket,
    pub months: Vec<MonthTotals>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthTotals {
    /// `YYYY-MM`.
    pub month: String,

    #[serde(rename = "import_kwh")]
    pub import: KilowattHours,

    #[serde(rename = "export_kwh")]
    pub export: KilowattHours,
}

/// Import and export per UTC calendar month, ascending.
pub fn monthly_import_export(readings: &[HourlyReading]) -> MonthlyImportExport {
    let mut sums = BTreeMap::<DateTime<Utc>, (CompensatedSum, CompensatedSum)>::new();
    for reading in readings {
        let (import, export) = sums.entry(Bucket::Month.truncate(reading.timestamp)).or_default();
        *import += reading.import.0;
        *export += reading.export.0;
    }
    let months = sums
        .into_iter()
        .map(|(start, (import, export))| MonthTotals {
            month: start.format("%Y-%m").to_string(),
            import: KilowattHours::from(import.total()),
            export: KilowattHours::from(export.total()),
        })
        .collect();
    MonthlyImportExport { metric: "monthly_import_export", bucket: Bucket::Month, months }
}
