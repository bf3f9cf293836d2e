use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::{cost::Cost, energy::KilowattHours};

/// Net meter reading for the hour starting at `timestamp`.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyReading {
    pub timestamp: DateTime<Utc>,

    /// Energy drawn from the grid.
    #[serde(rename = "importKwh")]
    #[builder(default)]
    pub import: KilowattHours,

    /// Energy fed into the grid.
    #[serde(rename = "exportKwh")]
    #[builder(default)]
    pub export: KilowattHours,

    /// What the utility billed for the hour, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
}

impl HourlyReading {
    /// Energy drawn net of the energy fed back.
    pub fn net_import(&self) -> KilowattHours {
        self.import - self.export
    }
}

#[cfg(test)]
impl HourlyReading {
    /// Reading without a billed cost, at a timestamp given as text.
    pub fn fixture(timestamp: &str, import: f64, export: f64) -> Self {
        let timestamp: crate::core::window::Timestamp = timestamp.parse().unwrap();
        Self::builder()
            .timestamp(timestamp.0)
            .import(KilowattHours::from(import))
            .export(KilowattHours::from(export))
            .build()
    }
}
