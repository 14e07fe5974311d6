//! billing-core
//!
//! Charge computation, period resolution and the idempotent ledger merge.
//! Depends on billing-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod calculator;
pub mod error;
pub mod merger;
pub mod period;
pub mod receipt;
pub mod statement;
pub mod storage;
pub mod time;

pub use calculator::ChargeCalculator;
pub use error::{BillingError, InputSource, MissingSource, ReceiptError};
pub use merger::{LedgerMerger, MergeOutcome};
pub use period::PeriodResolver;
pub use receipt::{receipt_file_name, ReceiptRenderer};
pub use statement::YearlyStatement;
pub use storage::LedgerStore;
pub use time::{Clock, FixedClock};
