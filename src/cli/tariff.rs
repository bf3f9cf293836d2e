use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

use crate::{
    api,
    cli::{print_json, readings::parse_timezone},
    core::tariff::{Tariff, TariffDefaults, TariffNormalizer},
    prelude::*,
};

/// Which defaults fill in what a tariff leaves out.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum Schema {
    /// USD, UTC.
    Strict,

    /// USD, `America/Los_Angeles`.
    #[default]
    Loose,
}

#[derive(Parser)]
pub struct TariffSourceArgs {
    /// Tariff description, JSON or TOML (by the extension).
    #[clap(long, env = "TARIFF_PATH")]
    pub tariff: PathBuf,

    #[clap(long, env = "TARIFF_SCHEMA", value_enum, default_value_t)]
    pub schema: Schema,

    /// Overrides the timezone default of the schema.
    #[clap(long, env = "DEFAULT_TIMEZONE", value_parser = parse_timezone)]
    pub default_timezone: Option<Tz>,

    /// Overrides the currency default of the schema.
    #[clap(long, env = "DEFAULT_CURRENCY")]
    pub default_currency: Option<String>,
}

impl TariffSourceArgs {
    pub fn defaults(&self) -> TariffDefaults {
        let mut defaults = match self.schema {
            Schema::Strict => TariffDefaults::strict(),
            Schema::Loose => TariffDefaults::loose(),
        };
        if let Some(timezone) = self.default_timezone {
            defaults.timezone = timezone;
        }
        if let Some(currency) = &self.default_currency {
            defaults.currency.clone_from(currency);
        }
        defaults
    }

    pub fn load(&self) -> Result<Tariff> {
        let raw = api::tariff::load(&self.tariff)?;
        let tariff = TariffNormalizer::new(self.defaults())
            .normalize(&raw)
            .with_context(|| format!("invalid tariff in `{}`", self.tariff.display()))?;
        info!(kind = tariff.kind(), timezone = %tariff.billing().timezone, "Normalized the tariff");
        Ok(tariff)
    }
}

#[derive(Parser)]
pub struct TariffArgs {
    #[clap(flatten)]
    pub source: TariffSourceArgs,
}

impl TariffArgs {
    pub fn run(self) -> Result {
        print_json(&self.source.load()?)
    }
}
