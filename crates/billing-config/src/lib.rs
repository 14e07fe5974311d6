//! billing-config
//!
//! Run configuration for the billing job: where inputs, the ledger and
//! receipts live, plus receipt presentation settings.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::BillingConfig;
