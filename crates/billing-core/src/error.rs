use std::{fmt, io, path::PathBuf};

use billing_domain::RateGroup;
use thiserror::Error;

/// Configuration sources a run cannot start without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    RateSchedule,
    ApartmentList,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputSource::RateSchedule => "rate schedule",
            InputSource::ApartmentList => "apartment list",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSource {
    pub input: InputSource,
    pub path: PathBuf,
}

impl fmt::Display for MissingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (`{}`)", self.input, self.path.display())
    }
}

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Required input not found: {}", join_missing(.0))]
    MissingInput(Vec<MissingSource>),
    #[error("Malformed {input} `{}`: {reason}", .path.display())]
    MalformedInput {
        input: InputSource,
        path: PathBuf,
        reason: String,
    },
    #[error("Rate `{key}` is missing from {group}")]
    MissingRateKey { group: RateGroup, key: String },
    #[error("Rate `{key}` in {group} is invalid ({value}): {reason}")]
    InvalidRate {
        group: RateGroup,
        key: String,
        value: f64,
        reason: &'static str,
    },
    #[error("Receipt could not be written: {0}")]
    Receipt(#[from] ReceiptError),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of a [`crate::ReceiptRenderer`]. Never retried.
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("failed to write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("receipt template failed: {0}")]
    Template(String),
    #[error("{0}")]
    Rejected(String),
}

fn join_missing(sources: &[MissingSource]) -> String {
    sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
