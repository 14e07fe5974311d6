//! Housing Billing computes monthly maintenance charges for a building's
//! apartments, records them in an append-only JSON ledger and writes an HTML
//! receipt for every new charge.

pub mod cli;
pub mod errors;
pub mod receipt;
pub mod runner;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Housing billing tracing initialized.");
    });
}
