//! Per-apartment yearly view over the ledger.

use billing_domain::{ApartmentId, Ledger, LedgerEntry};

/// All charges issued to one apartment within one calendar year, by month.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyStatement {
    pub apartment: ApartmentId,
    pub year: i32,
    pub entries: Vec<LedgerEntry>,
    pub total_billed: i64,
}

impl YearlyStatement {
    pub fn for_apartment(ledger: &Ledger, apartment: ApartmentId, year: i32) -> Self {
        let mut entries: Vec<LedgerEntry> = ledger
            .for_apartment(apartment)
            .filter(|entry| entry.period.year() == year)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.period);
        let total_billed = entries.iter().map(|entry| entry.amount).sum();
        Self {
            apartment,
            year,
            entries,
            total_billed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
