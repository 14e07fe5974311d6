use std::{
    env, fs,
    path::{Path, PathBuf},
};

use billing_storage_json::fs::write_atomic;
use chrono::NaiveDate;

use crate::{BillingConfig, ConfigError};

pub const CONFIG_FILE_NAME: &str = "billing.json";
/// Overrides the base directory (defaults to the current directory).
pub const HOME_ENV: &str = "HOUSING_BILLING_HOME";
/// Pins the run date, formatted `YYYY-MM-DD`.
pub const TODAY_ENV: &str = "HOUSING_BILLING_TODAY";

/// Locates, loads and persists [`BillingConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(base_dir: PathBuf) -> Self {
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        Self {
            base_dir,
            config_path,
        }
    }

    /// Manager rooted at `$HOUSING_BILLING_HOME`, or the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match env::var_os(HOME_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => env::current_dir()?,
        };
        Ok(Self::new(base))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads `billing.json` when present, falling back to defaults, with paths
    /// resolved against the base directory.
    pub fn load(&self) -> Result<BillingConfig, ConfigError> {
        let config = if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            BillingConfig::default()
        };
        let config = config.resolved_against(&self.base_dir);
        config.validate()?;
        Ok(config)
    }

    /// [`Self::load`] plus the `HOUSING_BILLING_TODAY` override.
    pub fn load_with_env(&self) -> Result<BillingConfig, ConfigError> {
        let mut config = self.load()?;
        if let Some(raw) = env::var_os(TODAY_ENV) {
            let raw = raw.to_string_lossy();
            let today = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
                ConfigError::Invalid {
                    key: TODAY_ENV,
                    reason: format!("`{raw}`: {err}"),
                }
            })?;
            config.today = Some(today);
        }
        Ok(config)
    }

    pub fn save(&self, config: &BillingConfig) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }
}

