use billing_config::ConfigError;
use billing_core::BillingError;
use thiserror::Error;

/// Error type surfaced by the command-line entry point.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Billing(#[from] BillingError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Usage(String),
}
