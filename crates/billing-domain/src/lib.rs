//! billing-domain
//!
//! Pure data model for housing-maintenance billing (apartments, rates, periods,
//! charge breakdowns, ledger entries). No I/O, no CLI, no storage.

pub mod apartment;
pub mod breakdown;
pub mod ledger;
pub mod period;
pub mod rates;
pub mod schema;

pub use apartment::*;
pub use breakdown::*;
pub use ledger::*;
pub use period::*;
pub use rates::*;
pub use schema::*;
