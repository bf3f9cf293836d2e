//! Validated tariffs.
//!
//! A [`Tariff`] can only be built through the validating constructors below, or from a loose
//! description through [`normalize::TariffNormalizer`].

pub mod billing;
pub mod day;
pub mod hours;
pub mod normalize;
pub mod period;
pub mod raw;

use serde::{Serialize, Serializer};

pub use self::{
    billing::Billing,
    day::{DayOfWeek, DaysOfWeek},
    hours::HourRange,
    normalize::{TariffDefaults, TariffNormalizer},
    period::TariffPeriod,
    raw::{RawPeriod, RawTariffInput},
};
use crate::{
    core::{Error, Result, tariff::hours::HOURS_PER_DAY},
    quantity::rate::KilowattHourRate,
};

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum Tariff {
    Flat(FlatTariff),
    TimeOfUse(TimeOfUseTariff),
}

impl Tariff {
    pub const fn billing(&self) -> &Billing {
        match self {
            Self::Flat(tariff) => &tariff.billing,
            Self::TimeOfUse(tariff) => &tariff.billing,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::TimeOfUse(_) => "tou",
        }
    }
}

/// Serialized in the loose input shape, so that the output can be fed back as is.
impl Serialize for Tariff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawTariffInput::from(self).serialize(serializer)
    }
}

/// Single import and export rate at any time.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTariff {
    pub import_rate: KilowattHourRate,
    pub export_rate: KilowattHourRate,
    pub billing: Billing,
}

impl FlatTariff {
    /// The export rate mirrors the import rate unless given, so that exports are credited.
    pub fn try_new(
        import_rate: KilowattHourRate,
        export_rate: Option<KilowattHourRate>,
        billing: Billing,
    ) -> Result<Self> {
        if import_rate.0.is_nan() || import_rate.0 < 0.0 {
            return Err(Error::NegativeRate {
                field: "`rateImport`".to_owned(),
                value: import_rate.0,
            });
        }
        Ok(Self { import_rate, export_rate: export_rate.unwrap_or(-import_rate), billing })
    }
}

/// Rates depending on the local clock hour and day of week.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct TimeOfUseTariff {
    /// Non-empty, and in the order of precedence.
    pub periods: Vec<TariffPeriod>,

    pub billing: Billing,
}

impl TimeOfUseTariff {
    pub fn try_new(periods: Vec<TariffPeriod>, billing: Billing) -> Result<Self> {
        if periods.is_empty() {
            return Err(Error::EmptyPeriods);
        }
        check_overlaps(&periods)?;
        Ok(Self { periods, billing })
    }
}

/// Reject periods claiming the same local hour.
///
/// Known limitation: the check runs on a single 24-hour grid and ignores the days of week,
/// so periods on disjoint days with the same hours are reported as overlapping.
fn check_overlaps(periods: &[TariffPeriod]) -> Result {
    let mut claimed_by: [Option<&str>; HOURS_PER_DAY as usize] = [None; HOURS_PER_DAY as usize];
    for period in periods {
        for hour in period.hours.start..period.hours.end {
            let slot = &mut claimed_by[usize::from(hour)];
            if let Some(owner) = slot {
                return Err(Error::OverlappingPeriods {
                    hour,
                    period: period.name.clone(),
                    claimed_by: (*owner).to_owned(),
                });
            }
            *slot = Some(period.name.as_str());
        }
    }
    Ok(())
}
