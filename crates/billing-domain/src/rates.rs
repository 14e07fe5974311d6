//! Shared rate table applied to every apartment in a run.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Per-area and flat unit prices, keyed by charge name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Price per square meter.
    #[serde(rename = "monthly_rates", alias = "area_rates", default)]
    pub area_rates: BTreeMap<String, f64>,
    /// Price per apartment.
    #[serde(rename = "fixed_rates", alias = "flat_rates", default)]
    pub flat_rates: BTreeMap<String, f64>,
}

impl RateSchedule {
    pub fn with_area_rate(mut self, key: impl Into<String>, rate: f64) -> Self {
        self.area_rates.insert(key.into(), rate);
        self
    }

    pub fn with_flat_rate(mut self, key: impl Into<String>, rate: f64) -> Self {
        self.flat_rates.insert(key.into(), rate);
        self
    }

    pub fn group(&self, group: RateGroup) -> &BTreeMap<String, f64> {
        match group {
            RateGroup::Area => &self.area_rates,
            RateGroup::Flat => &self.flat_rates,
        }
    }

    pub fn rate(&self, group: RateGroup, key: &str) -> Option<f64> {
        self.group(group).get(key).copied()
    }
}

/// Which table a rate lives in; also decides how a charge line is quantified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateGroup {
    Area,
    Flat,
}

impl RateGroup {
    /// Label of the group as it appears in the rate file.
    pub fn source_key(self) -> &'static str {
        match self {
            RateGroup::Area => "monthly_rates",
            RateGroup::Flat => "fixed_rates",
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            RateGroup::Area => "per m²",
            RateGroup::Flat => "per apartment",
        }
    }
}

impl fmt::Display for RateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_key())
    }
}
