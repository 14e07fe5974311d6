//! The fixed set of charge lines every receipt carries.

use serde::{Deserialize, Serialize};

use crate::rates::RateGroup;

/// One charge the calculator produces for every apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Rate key looked up in the matching [`RateGroup`].
    pub key: String,
    /// Human-readable service name printed on receipts.
    pub label: String,
    pub group: RateGroup,
    /// Apartment flag that must be `true` for the charge to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
}

impl ChargeLine {
    pub fn area(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: RateGroup::Area,
            gate: None,
        }
    }

    pub fn flat(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: RateGroup::Flat,
            gate: None,
        }
    }

    pub fn gated_by(mut self, flag: impl Into<String>) -> Self {
        self.gate = Some(flag.into());
        self
    }
}

/// Ordered charge lines. Area-based lines always precede flat lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeSchema {
    lines: Vec<ChargeLine>,
}

impl ChargeSchema {
    pub fn new(lines: Vec<ChargeLine>) -> Self {
        Self { lines }
    }

    /// Lines in canonical order: area lines as declared, then flat lines as declared.
    pub fn lines(&self) -> impl Iterator<Item = &ChargeLine> {
        self.lines_in(RateGroup::Area)
            .chain(self.lines_in(RateGroup::Flat))
    }

    pub fn lines_in(&self, group: RateGroup) -> impl Iterator<Item = &ChargeLine> {
        self.lines.iter().filter(move |line| line.group == group)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for ChargeSchema {
    fn default() -> Self {
        Self::new(vec![
            ChargeLine::area("maintenance_sqm", "Building maintenance"),
            ChargeLine::area("capital_repair_sqm", "Capital repair fund"),
            ChargeLine::area("heat_meter_service_sqm", "Heat meter servicing"),
            ChargeLine::flat("cleaning_unit", "Stairwell cleaning"),
            ChargeLine::flat("video_service_unit", "Entrance door & video surveillance")
                .gated_by("has_video"),
        ])
    }
}
