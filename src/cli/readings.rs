use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;

use crate::{
    api::{ReadingStore, readings},
    core::Error,
    prelude::*,
};

#[derive(Parser)]
pub struct ReadingsArgs {
    /// Hourly CSV export of the utility.
    #[clap(long, env = "READINGS_PATH")]
    pub readings: PathBuf,

    /// Zone of the meter clock in the export.
    #[clap(
        long = "meter-timezone",
        env = "METER_TIMEZONE",
        default_value = "America/Los_Angeles",
        value_parser = parse_timezone,
    )]
    pub meter_timezone: Tz,
}

impl ReadingsArgs {
    pub fn load(&self) -> Result<ReadingStore> {
        let store = ReadingStore::from(readings::load(&self.readings, self.meter_timezone)?);
        ensure!(!store.is_empty(), "`{}` contains no readings", self.readings.display());
        Ok(store)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, Error> {
    name.parse().map_err(|_| Error::UnknownTimezone(name.to_owned()))
}
