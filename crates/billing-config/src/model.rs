use std::path::{Path, PathBuf};

use billing_domain::ChargeSchema;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings for one billing run. Every field has a default, so an absent or
/// partial `billing.json` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub rates_path: PathBuf,
    pub apartments_path: PathBuf,
    pub ledger_path: PathBuf,
    pub receipts_dir: PathBuf,
    /// Prefix stored in ledger entries in front of the receipt file name.
    pub receipt_link_prefix: String,
    pub building_name: String,
    /// Day of the following month by which the charge is due.
    pub payment_due_day: u32,
    pub backup_retention: usize,
    pub schema: ChargeSchema,
    /// Pins "today" instead of reading the system clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            rates_path: PathBuf::from("rates_config.json"),
            apartments_path: PathBuf::from("apartments_config.json"),
            ledger_path: PathBuf::from("payments.json"),
            receipts_dir: PathBuf::from("receipts"),
            receipt_link_prefix: "receipts".into(),
            building_name: "Aqsai-3, 10a Homeowners Association".into(),
            payment_due_day: 25,
            backup_retention: 5,
            schema: ChargeSchema::default(),
            today: None,
        }
    }
}

impl BillingConfig {
    /// Anchors relative paths at `base` and expands a leading `~`.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        for path in [
            &mut self.rates_path,
            &mut self.apartments_path,
            &mut self.ledger_path,
            &mut self.receipts_dir,
        ] {
            *path = resolve_path(base, path);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=28).contains(&self.payment_due_day) {
            return Err(ConfigError::Invalid {
                key: "payment_due_day",
                reason: format!("{} is not a day present in every month", self.payment_due_day),
            });
        }
        if self.backup_retention == 0 {
            return Err(ConfigError::Invalid {
                key: "backup_retention",
                reason: "at least one backup must be kept".into(),
            });
        }
        if self.schema.is_empty() {
            return Err(ConfigError::Invalid {
                key: "schema",
                reason: "no charge lines configured".into(),
            });
        }
        Ok(())
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
