use serde::{Deserialize, Serialize};

use crate::core::tariff::{Tariff, TariffPeriod};

/// Tariff as described by a user or a tool, before any validation.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTariffInput {
    /// `flat` or `tou`, case-insensitive.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_import: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_export: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// IANA zone identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_monthly_fee: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prorate_fixed_fee: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<RawPeriod>>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPeriod {
    pub name: String,
    pub rate_import: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_export: Option<f64>,

    /// Either a `[start, end]` pair or a set of discrete hour slots.
    pub hours: Vec<u8>,

    /// `0` is Sunday. Absent or empty means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
}

impl From<&TariffPeriod> for RawPeriod {
    fn from(period: &TariffPeriod) -> Self {
        Self {
            name: period.name.clone(),
            rate_import: period.import_rate.0,
            rate_export: Some(period.export_rate.0),
            hours: vec![period.hours.start, period.hours.end],
            days_of_week: Some(period.days.iter().map(|day| day.index()).collect()),
        }
    }
}

/// Fully explicit description of a validated tariff.
impl From<&Tariff> for RawTariffInput {
    fn from(tariff: &Tariff) -> Self {
        let billing = tariff.billing();
        let mut raw = Self {
            kind: tariff.kind().to_owned(),
            currency: Some(billing.currency.clone()),
            timezone: Some(billing.timezone.name().to_owned()),
            fixed_monthly_fee: Some(billing.fixed_monthly_fee.0),
            prorate_fixed_fee: Some(billing.prorate_fixed_fee),
            ..Self::default()
        };
        match tariff {
            Tariff::Flat(flat) => {
                raw.rate_import = Some(flat.import_rate.0);
                raw.rate_export = Some(flat.export_rate.0);
            }
            Tariff::TimeOfUse(tou) => {
                raw.periods = Some(tou.periods.iter().map(RawPeriod::from).collect());
            }
        }
        raw
    }
}
