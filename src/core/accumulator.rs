use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    core::{
        Error,
        Result,
        matcher::{LocalHour, match_period},
        reading::HourlyReading,
        sum::CompensatedSum,
        tariff::{Tariff, TimeOfUseTariff},
        window::TimeWindow,
    },
    quantity::{cost::Cost, energy::KilowattHours},
};

const NOTE: &str =
    "Exports use rateExport (default = -rateImport). Positive = you pay; negative = credit.";

/// Applies a validated tariff to the readings of a window.
///
/// The readings are expected to be already restricted to the window: the accumulator does not
/// filter them.
#[must_use]
#[derive(Builder)]
pub struct CostAccumulator<'a> {
    window: TimeWindow,
    tariff: &'a Tariff,

    /// Record the period matched by every reading of a time-of-use tariff.
    #[builder(default)]
    record_trace: bool,
}

impl CostAccumulator<'_> {
    pub fn accumulate(&self, readings: &[HourlyReading]) -> Result<CostResult> {
        let mut trace = Vec::new();
        let energy = match self.tariff {
            Tariff::Flat(flat) => {
                let import = readings.iter().map(|reading| reading.import).sum::<KilowattHours>();
                let export = readings.iter().map(|reading| reading.export).sum::<KilowattHours>();
                import * flat.import_rate + export * flat.export_rate
            }
            Tariff::TimeOfUse(tou) => {
                let trace = self.record_trace.then_some(&mut trace);
                Self::accumulate_time_of_use(tou, readings, trace)?
            }
        };
        let fixed_fee = self.tariff.billing().fixed_fee(&self.window);

        Ok(CostResult {
            metric: "plan_cost",
            window: self.window,
            total: energy + fixed_fee,
            unit: self.tariff.billing().currency.clone(),
            note: NOTE,
            breakdown: CostBreakdown { energy, fixed_fee },
            normalized_tariff: self.tariff.clone(),
            trace,
        })
    }

    /// One running sum over all readings, failing on the first uncovered hour.
    fn accumulate_time_of_use(
        tariff: &TimeOfUseTariff,
        readings: &[HourlyReading],
        mut trace: Option<&mut Vec<MatchedPeriod>>,
    ) -> Result<Cost> {
        let timezone = tariff.billing.timezone;
        let mut total = CompensatedSum::ZERO;
        for reading in readings {
            let local = LocalHour::at(reading.timestamp, timezone);
            let period = match_period(reading.timestamp, &tariff.periods, timezone).ok_or(
                Error::UnmatchedPeriod {
                    timestamp: reading.timestamp,
                    hour: local.hour,
                    day_of_week: local.day.index(),
                },
            )?;
            let cost = reading.import * period.import_rate + reading.export * period.export_rate;
            total += cost.0;
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(MatchedPeriod {
                    timestamp: reading.timestamp,
                    local_hour: local.hour,
                    day_of_week: local.day.index(),
                    period: period.name.clone(),
                    cost,
                });
            }
        }
        Ok(Cost::from(total.total()))
    }
}

/// Signed cost of a window under a tariff.
#[must_use]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub metric: &'static str,
    pub window: TimeWindow,

    /// Positive is owed, negative is a credit.
    pub total: Cost,

    /// Currency code.
    pub unit: String,

    pub note: &'static str,
    pub breakdown: CostBreakdown,
    pub normalized_tariff: Tariff,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<MatchedPeriod>,
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub energy: Cost,
    pub fixed_fee: Cost,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPeriod {
    pub timestamp: DateTime<Utc>,
    pub local_hour: u8,

    /// `0` is Sunday.
    pub day_of_week: u8,

    pub period: String,
    pub cost: Cost,
}
