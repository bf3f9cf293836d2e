//! Hourly CSV export of the utility.
//!
//! The export starts with a free-form preamble, followed by the table:
//!
//! ```text
//! TYPE,DATE,START TIME,END TIME,IMPORT (kWh),EXPORT (kWh),COST,NOTES
//! Electric usage,2025-07-14,00:00,00:59,0.42,0.00,$0.13,
//! ```

use std::{fs, path::Path};

use chrono::{DateTime, MappedLocalTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    core::HourlyReading,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

const HEADER: &str = "TYPE,DATE,START TIME";
const N_FIELDS: usize = 7;

#[instrument(skip_all, fields(path = %path.display()), name = "Loading readings…")]
pub fn load(path: &Path, meter_timezone: Tz) -> Result<Vec<HourlyReading>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    let readings = parse(&text, meter_timezone)?;
    info!(n_readings = readings.len(), "Loaded");
    Ok(readings)
}

/// Parse the export, skipping the malformed rows. The readings are sorted by time.
pub fn parse(text: &str, meter_timezone: Tz) -> Result<Vec<HourlyReading>> {
    let header_index = text.find(HEADER).context("could not find the header row")?;
    let table_start = text[..header_index].rfind('\n').map_or(0, |index| index + 1);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text[table_start..].as_bytes());

    let mut readings: Vec<HourlyReading> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let previous = readings.last().map(|reading| reading.timestamp);
        let reading = record
            .context("malformed row")
            .and_then(|record| parse_record(&record, meter_timezone, previous));
        match reading {
            Ok(reading) => readings.push(reading),
            Err(error) => warn!(row = index + 1, "Skipped: {error:#}"),
        }
    }
    readings.sort_by_key(|reading| reading.timestamp);
    Ok(readings)
}

fn parse_record(
    record: &StringRecord,
    meter_timezone: Tz,
    previous: Option<DateTime<Utc>>,
) -> Result<HourlyReading> {
    ensure!(record.len() >= N_FIELDS, "expected {N_FIELDS} fields, got {}", record.len());
    let date = NaiveDate::parse_from_str(&record[1], "%Y-%m-%d")
        .with_context(|| format!("invalid date `{}`", &record[1]))?;
    let time = NaiveTime::parse_from_str(&record[2], "%H:%M")
        .with_context(|| format!("invalid start time `{}`", &record[2]))?;
    let timestamp = match meter_timezone.from_local_datetime(&date.and_time(time)) {
        MappedLocalTime::Single(timestamp) => timestamp.to_utc(),

        // The repeated hour is exported twice, in order:
        MappedLocalTime::Ambiguous(earliest, latest) => {
            if previous == Some(earliest.to_utc()) { latest.to_utc() } else { earliest.to_utc() }
        }

        MappedLocalTime::None => bail!("{date} {time} does not exist in {meter_timezone}"),
    };
    Ok(HourlyReading::builder()
        .timestamp(timestamp)
        .import(KilowattHours::from(parse_number(&record[4])?))
        .export(KilowattHours::from(parse_number(&record[5])?))
        .cost(Cost::from(parse_number(&record[6])?).round_to_cents())
        .build())
}

fn parse_number(field: &str) -> Result<f64> {
    field
        .replace('$', "")
        .parse()
        .with_context(|| format!("invalid number `{field}`"))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::window::Timestamp;

    const EXPORT: &str = "\
Name,JANE DOE
Address,\"1 MAIN ST, SPRINGFIELD\"
Account Number,0000000

TYPE,DATE,START TIME,END TIME,IMPORT (kWh),EXPORT (kWh),COST,NOTES
Electric usage,2025-07-14,01:00,01:59,0.50,0.00,$0.157,
Electric usage,2025-07-14,00:00,00:59,0.42,0.10,$0.13,
Electric usage,2025-07-14,02:00,02:59,n/a,0.00,$0.10,
Electric usage,2025-07-14,03:00
";

    fn instant(text: &str) -> DateTime<Utc> {
        text.parse::<Timestamp>().unwrap().0
    }

    #[test]
    fn parse_ok() -> Result {
        let readings = parse(EXPORT, Tz::America__Los_Angeles)?;
        assert_eq!(readings.len(), 2);

        assert_eq!(readings[0].timestamp, instant("2025-07-14T07:00:00Z"));
        assert_abs_diff_eq!(readings[0].import.0, 0.42);
        assert_abs_diff_eq!(readings[0].export.0, 0.10);
        assert_abs_diff_eq!(readings[0].cost.unwrap().0, 0.13);

        assert_eq!(readings[1].timestamp, instant("2025-07-14T08:00:00Z"));
        assert_abs_diff_eq!(readings[1].cost.unwrap().0, 0.16);
        Ok(())
    }

    #[test]
    fn repeated_hour_ok() -> Result {
        let export = "\
TYPE,DATE,START TIME,END TIME,IMPORT (kWh),EXPORT (kWh),COST
Electric usage,2025-11-02,01:00,01:59,1.0,0.0,$0.30
Electric usage,2025-11-02,01:00,01:59,2.0,0.0,$0.60
Electric usage,2025-11-02,02:00,02:59,3.0,0.0,$0.90
";
        let readings = parse(export, Tz::America__Los_Angeles)?;
        let timestamps = readings.iter().map(|reading| reading.timestamp).collect::<Vec<_>>();
        assert_eq!(
            timestamps,
            [
                instant("2025-11-02T08:00:00Z"),
                instant("2025-11-02T09:00:00Z"),
                instant("2025-11-02T10:00:00Z"),
            ],
        );
        Ok(())
    }

    #[test]
    fn skipped_hour_is_dropped() -> Result {
        let export = "\
TYPE,DATE,START TIME,END TIME,IMPORT (kWh),EXPORT (kWh),COST
Electric usage,2025-03-09,02:00,02:59,1.0,0.0,$0.30
Electric usage,2025-03-09,03:00,03:59,1.0,0.0,$0.30
";
        let readings = parse(export, Tz::America__Los_Angeles)?;
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].timestamp, instant("2025-03-09T10:00:00Z"));
        Ok(())
    }

    #[test]
    fn missing_header_fails() {
        assert!(parse("DATE,IMPORT\n2025-07-14,1.0\n", Tz::UTC).is_err());
    }
}
