use chrono_tz::Tz;

use crate::{
    core::{
        Error,
        Result,
        tariff::{
            Billing,
            FlatTariff,
            RawPeriod,
            RawTariffInput,
            Tariff,
            TariffPeriod,
            TimeOfUseTariff,
            day::{DayOfWeek, DaysOfWeek},
            hours::{HOURS_PER_DAY, compress},
        },
    },
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Values assumed for the fields a loose tariff leaves out.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TariffDefaults {
    pub currency: String,
    pub timezone: Tz,
}

impl TariffDefaults {
    /// Defaults of the general tariff schema.
    pub fn strict() -> Self {
        Self { currency: "USD".to_owned(), timezone: Tz::UTC }
    }

    /// Defaults of the loose, tool-facing entry point.
    pub fn loose() -> Self {
        Self { currency: "USD".to_owned(), timezone: Tz::America__Los_Angeles }
    }
}

impl Default for TariffDefaults {
    fn default() -> Self {
        Self::strict()
    }
}

/// Turns loose tariff descriptions into validated [`Tariff`]s.
#[must_use]
pub struct TariffNormalizer {
    defaults: TariffDefaults,
}

impl TariffNormalizer {
    pub const fn new(defaults: TariffDefaults) -> Self {
        Self { defaults }
    }

    pub fn normalize(&self, raw: &RawTariffInput) -> Result<Tariff> {
        // A time-of-use tariff without periods falls back to the flat one:
        let raw_periods = match raw.kind.trim().to_lowercase().as_str() {
            "flat" => None,
            "tou" => raw.periods.as_deref().filter(|periods| !periods.is_empty()),
            _ => return Err(Error::UnknownTariffType(raw.kind.clone())),
        };
        let billing = self.billing(raw)?;
        if let Some(raw_periods) = raw_periods {
            let mut periods = Vec::with_capacity(raw_periods.len());
            for raw_period in raw_periods {
                periods.extend(normalize_period(raw_period)?);
            }
            Ok(Tariff::TimeOfUse(TimeOfUseTariff::try_new(periods, billing)?))
        } else {
            let import_rate = raw.rate_import.ok_or(Error::MissingFlatRate)?;
            let tariff = FlatTariff::try_new(
                KilowattHourRate::from(import_rate),
                raw.rate_export.map(KilowattHourRate::from),
                billing,
            )?;
            Ok(Tariff::Flat(tariff))
        }
    }

    fn billing(&self, raw: &RawTariffInput) -> Result<Billing> {
        let currency = raw
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|currency| !currency.is_empty())
            .map_or_else(|| self.defaults.currency.clone(), str::to_owned);
        let timezone = match raw.timezone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                name.parse::<Tz>().map_err(|_| Error::UnknownTimezone(name.to_owned()))?
            }
            _ => self.defaults.timezone,
        };
        Billing::try_new(
            Cost::from(raw.fixed_monthly_fee.unwrap_or_default()),
            raw.prorate_fixed_fee.unwrap_or(true),
            currency,
            timezone,
        )
    }
}

/// Expand a loose period into one period per contiguous hour range.
fn normalize_period(raw: &RawPeriod) -> Result<Vec<TariffPeriod>> {
    let days = match raw.days_of_week.as_deref() {
        None | Some([]) => DaysOfWeek::all(),
        Some(indices) => {
            let mut days = DaysOfWeek::empty();
            for &day in indices {
                days |= DayOfWeek::from_index(day)
                    .ok_or_else(|| Error::InvalidDayOfWeek { period: raw.name.clone(), day })?;
            }
            days
        }
    };

    if let Some(hour) = raw.hours.iter().find(|hour| **hour > HOURS_PER_DAY) {
        return Err(Error::InvalidHourSpec {
            period: raw.name.clone(),
            reason: format!("hour {hour} is out of 0..=24"),
        });
    }
    let ranges = compress(&raw.hours);
    if ranges.is_empty() {
        return Err(Error::InvalidHourSpec {
            period: raw.name.clone(),
            reason: format!("{:?} does not describe any hour", raw.hours),
        });
    }

    ranges
        .into_iter()
        .map(|hours| {
            TariffPeriod::try_new()
                .name(raw.name.clone())
                .import_rate(KilowattHourRate::from(raw.rate_import))
                .maybe_export_rate(raw.rate_export.map(KilowattHourRate::from))
                .hours(hours)
                .days(days)
                .call()
        })
        .collect()
}
