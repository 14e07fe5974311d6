//! Idempotent merge of newly computed charges into the ledger.

use std::collections::HashSet;

use billing_domain::{
    ApartmentId, ApartmentProfile, BillingPeriod, ChargeSchema, EntryKey, Ledger, LedgerEntry,
    RateSchedule,
};
use tracing::{debug, info, warn};

use crate::{calculator::ChargeCalculator, receipt::ReceiptRenderer, BillingError};

/// Result of a merge: the full ledger to persist plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub ledger: Ledger,
    /// Entries appended by this merge, in apartment-list order.
    pub new_entries: Vec<LedgerEntry>,
    /// Apartments that already had an entry for the period.
    pub skipped: Vec<ApartmentId>,
}

/// Sole owner of the decision whether an (apartment, period) needs a new entry.
pub struct LedgerMerger;

impl LedgerMerger {
    /// Bills every apartment in `profiles` that has no entry for `period` yet.
    ///
    /// Existing entries are copied unchanged and new ones appended after them.
    /// Each new entry is recorded only after its receipt rendered; any error
    /// aborts the whole merge and no ledger is returned.
    pub fn merge(
        existing: &Ledger,
        profiles: &[ApartmentProfile],
        rates: &RateSchedule,
        schema: &ChargeSchema,
        period: BillingPeriod,
        renderer: &mut dyn ReceiptRenderer,
    ) -> Result<MergeOutcome, BillingError> {
        ChargeCalculator::validate(rates, schema)?;

        let mut billed: HashSet<EntryKey> = existing.keys();
        let mut new_entries = Vec::new();
        let mut skipped = Vec::new();

        for profile in profiles {
            let key = (profile.id, period);
            if billed.contains(&key) {
                if new_entries.iter().any(|entry: &LedgerEntry| entry.key() == key) {
                    warn!(
                        apartment = %profile.id,
                        %period,
                        "apartment listed more than once; billing it once"
                    );
                } else {
                    debug!(apartment = %profile.id, %period, "entry already exists; skipping");
                }
                skipped.push(profile.id);
                continue;
            }

            let breakdown = ChargeCalculator::compute(profile, rates, schema)?;
            let receipt = renderer.render(profile, rates, period, &breakdown)?;
            let entry = LedgerEntry::pending(profile.id, period, breakdown.total(), receipt);
            info!(
                apartment = %profile.id,
                %period,
                amount = entry.amount,
                receipt = %entry.receipt,
                "charge added"
            );
            billed.insert(key);
            new_entries.push(entry);
        }

        let mut ledger = existing.clone();
        for entry in &new_entries {
            ledger.append(entry.clone());
        }

        Ok(MergeOutcome {
            ledger,
            new_entries,
            skipped,
        })
    }
}
