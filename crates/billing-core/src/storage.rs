use billing_domain::Ledger;

use crate::BillingError;

/// Abstraction over persistence backends holding the billing ledger.
pub trait LedgerStore {
    /// Reads the whole ledger. An absent or empty store is an empty ledger.
    fn load(&self) -> Result<Ledger, BillingError>;
    /// Replaces the stored ledger with `ledger` in one step.
    fn save(&self, ledger: &Ledger) -> Result<(), BillingError>;
}
