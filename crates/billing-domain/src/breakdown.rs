//! Itemized charges for one apartment in one period.

use serde::Serialize;

use crate::rates::RateGroup;

/// A single priced line of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeLineItem {
    pub key: String,
    pub label: String,
    pub group: RateGroup,
    pub unit_rate: f64,
    /// Floor area for area lines, `1` or `0` apartments for flat lines.
    pub quantity: f64,
    /// Whole currency units.
    pub amount: i64,
}

impl ChargeLineItem {
    /// Human-readable calculation, e.g. `45 * 50`.
    pub fn quantity_expression(&self) -> String {
        format!("{} * {}", self.quantity, self.unit_rate)
    }
}

/// Charge lines plus their total. The total is derived on construction and
/// cannot drift from the lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeBreakdown {
    lines: Vec<ChargeLineItem>,
    total: i64,
}

impl ChargeBreakdown {
    pub fn from_lines(lines: Vec<ChargeLineItem>) -> Self {
        let total = lines.iter().map(|line| line.amount).sum();
        Self { lines, total }
    }

    pub fn lines(&self) -> &[ChargeLineItem] {
        &self.lines
    }

    pub fn line(&self, key: &str) -> Option<&ChargeLineItem> {
        self.lines.iter().find(|line| line.key == key)
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, group: RateGroup, unit_rate: f64, quantity: f64, amount: i64) -> ChargeLineItem {
        ChargeLineItem {
            key: key.into(),
            label: key.into(),
            group,
            unit_rate,
            quantity,
            amount,
        }
    }

    #[test]
    fn total_is_sum_of_lines() {
        let breakdown = ChargeBreakdown::from_lines(vec![
            item("maintenance_sqm", RateGroup::Area, 50.0, 45.0, 2250),
            item("cleaning_unit", RateGroup::Flat, 800.0, 1.0, 800),
            item("video_service_unit", RateGroup::Flat, 300.0, 0.0, 0),
        ]);
        assert_eq!(breakdown.total(), 3050);
        assert_eq!(breakdown.lines().len(), 3);
    }

    #[test]
    fn quantity_expression_drops_trailing_zeroes() {
        let line = item("maintenance_sqm", RateGroup::Area, 50.0, 45.0, 2250);
        assert_eq!(line.quantity_expression(), "45 * 50");
        let line = item("heat_meter_service_sqm", RateGroup::Area, 5.5, 38.25, 210);
        assert_eq!(line.quantity_expression(), "38.25 * 5.5");
    }
}
