//! Append-only history of issued charges.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{de::Deserializer, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{apartment::ApartmentId, period::BillingPeriod};

/// Uniqueness key of a ledger entry.
pub type EntryKey = (ApartmentId, BillingPeriod);

/// Opaque pointer to a rendered receipt (relative path or URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptRef(pub String);

impl ReceiptRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Labels older ledgers use for the pending state.
const LEGACY_PENDING_LABELS: &[&str] = &["Күтуде"];

/// Lifecycle state of an entry. Billing only ever creates `Pending`; any
/// other label already present in a ledger is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryStatus {
    #[default]
    Pending,
    /// Pending, stored under a legacy label that is written back as read.
    PendingAs(String),
    Other(String),
}

impl EntryStatus {
    pub fn label(&self) -> &str {
        match self {
            EntryStatus::Pending => "Pending",
            EntryStatus::PendingAs(label) | EntryStatus::Other(label) => label,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntryStatus::Pending | EntryStatus::PendingAs(_))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EntryStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EntryStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "Pending" => EntryStatus::Pending,
            label if LEGACY_PENDING_LABELS.contains(&label) => EntryStatus::PendingAs(raw),
            _ => EntryStatus::Other(raw),
        })
    }
}

/// One apartment's charge for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub apartment: ApartmentId,
    #[serde(rename = "month")]
    pub period: BillingPeriod,
    pub amount: i64,
    pub status: EntryStatus,
    #[serde(rename = "receipt_link")]
    pub receipt: ReceiptRef,
    /// Fields written by other tools; preserved on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LedgerEntry {
    pub fn pending(
        apartment: ApartmentId,
        period: BillingPeriod,
        amount: i64,
        receipt: ReceiptRef,
    ) -> Self {
        Self {
            apartment,
            period,
            amount,
            status: EntryStatus::Pending,
            receipt,
            extra: Map::new(),
        }
    }

    pub fn key(&self) -> EntryKey {
        (self.apartment, self.period)
    }
}

/// Ordered ledger entries. Entries can be appended but never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn contains(&self, apartment: ApartmentId, period: BillingPeriod) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.apartment == apartment && entry.period == period)
    }

    /// Every (apartment, period) pair present in the ledger.
    pub fn keys(&self) -> HashSet<EntryKey> {
        self.entries.iter().map(LedgerEntry::key).collect()
    }

    pub fn for_apartment(&self, apartment: ApartmentId) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.apartment == apartment)
    }

    /// Detects anomalies in a loaded ledger, such as repeated (apartment, period) keys.
    pub fn warnings(&self) -> Vec<String> {
        let mut counts: HashMap<EntryKey, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.key()).or_default() += 1;
        }
        let mut duplicates: Vec<_> = counts.into_iter().filter(|(_, count)| *count > 1).collect();
        duplicates.sort();
        let mut warnings: Vec<String> = duplicates
            .into_iter()
            .map(|((apartment, period), count)| {
                format!("apartment {apartment} has {count} entries for {period}")
            })
            .collect();
        for entry in &self.entries {
            if entry.amount < 0 {
                warnings.push(format!(
                    "apartment {} entry for {} has negative amount {}",
                    entry.apartment, entry.period, entry.amount
                ));
            }
        }
        warnings
    }
}
