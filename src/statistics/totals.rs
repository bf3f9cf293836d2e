use serde::Serialize;

use crate::core::{HourlyReading, TimeWindow, sum::sum};

/// What [`energy_total`] adds up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EnergyMetric {
    /// Import minus export.
    #[default]
    Usage,

    Import,
    Export,

    /// Cost billed by the utility.
    #[value(alias = "actual_cost")]
    ActualCost,
}

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct EnergyTotal {
    pub metric: EnergyMetric,
    pub window: TimeWindow,
    pub total: f64,

    /// `kWh` or the currency code.
    pub unit: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Total of the metric over the readings of the window.
///
/// Readings without a billed cost count as zero for [`EnergyMetric::ActualCost`].
pub fn energy_total(
    readings: &[HourlyReading],
    metric: EnergyMetric,
    window: TimeWindow,
    currency: &str,
) -> EnergyTotal {
    let values = readings.iter().map(|reading| match metric {
        EnergyMetric::Usage => reading.net_import().0,
        EnergyMetric::Import => reading.import.0,
        EnergyMetric::Export => reading.export.0,
        EnergyMetric::ActualCost => reading.cost.map_or(0.0, |cost| cost.0),
    });
    EnergyTotal {
        metric,
        window,
        total: sum(values),
        unit: if metric == EnergyMetric::ActualCost { currency.to_owned() } else { "kWh".to_owned() },
        note: (metric == EnergyMetric::Usage).then_some("usage = SUM(import - export)"),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::{Bucket, window::Timestamp},
        quantity::cost::Cost,
    };

    fn window() -> TimeWindow {
        let from: Timestamp = "2025-07-14".parse().unwrap();
        let to: Timestamp = "2025-07-15".parse().unwrap();
        TimeWindow::new(from.0, to.0, Bucket::Day)
    }

    fn readings() -> Vec<HourlyReading> {
        let mut readings = vec![
            HourlyReading::fixture("2025-07-14T10:00:00Z", 1.5, 0.25),
            HourlyReading::fixture("2025-07-14T11:00:00Z", 0.5, 2.0),
            HourlyReading::fixture("2025-07-14T12:00:00Z", 0.75, 0.0),
        ];
        readings[0].cost = Some(Cost::from(0.45));
        readings[2].cost = Some(Cost::from(0.22));
        readings
    }

    #[test]
    fn usage_ok() {
        let total = energy_total(&readings(), EnergyMetric::Usage, window(), "USD");
        assert_abs_diff_eq!(total.total, 0.5);
        assert_eq!(total.unit, "kWh");
        assert!(total.note.is_some());
    }

    #[test]
    fn import_export_ok() {
        assert_abs_diff_eq!(energy_total(&readings(), EnergyMetric::Import, window(), "USD").total, 2.75);
        assert_abs_diff_eq!(energy_total(&readings(), EnergyMetric::Export, window(), "USD").total, 2.25);
    }

    #[test]
    fn actual_cost_ok() {
        let total = energy_total(&readings(), EnergyMetric::ActualCost, window(), "EUR");
        assert_abs_diff_eq!(total.total, 0.67, epsilon = 1e-12);
        assert_eq!(total.unit, "EUR");
        assert_eq!(total.note, None);
    }

    #[test]
    fn empty_is_zero() {
        assert_abs_diff_eq!(energy_total(&[], EnergyMetric::Usage, window(), "USD").total, 0.0);
    }
}
