//! billing-storage-json
//!
//! JSON persistence for the billing ledger, loaders for the rate and
//! apartment configuration files, and CSV import/export.

pub mod csv_io;
pub mod fs;
pub mod inputs;

use std::{
    cmp::Reverse,
    fs as std_fs,
    path::{Path, PathBuf},
};

use billing_core::{BillingError, LedgerStore};
use billing_domain::Ledger;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

pub use csv_io::export_ledger_csv;
pub use inputs::{ensure_inputs_exist, load_apartments, load_rate_schedule};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON ledger with rotating backups of previous versions.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonLedgerStore {
    /// Store at `path`, keeping backups in a `backups/` directory next to it.
    pub fn new(path: PathBuf) -> Self {
        let backups_dir = path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));
        Self::with_backups(path, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_backups(path: PathBuf, backups_dir: PathBuf, retention: usize) -> Self {
        Self {
            path,
            backups_dir,
            retention: retention.max(1),
        }
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, BillingError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}_", self.stem());
        let mut entries = Vec::new();
        for entry in std_fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                if name.starts_with(&prefix) {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort_by_key(|name| Reverse((parse_backup_name(name), name.clone())));
        Ok(entries)
    }

    fn stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("ledger")
            .to_string()
    }

    fn backup_existing_file(&self) -> Result<(), BillingError> {
        if !self.path.exists() {
            return Ok(());
        }
        std_fs::create_dir_all(&self.backups_dir)?;
        let backup_path = self.next_backup_path(Utc::now())?;
        std_fs::copy(&self.path, &backup_path)?;
        debug!(backup = %backup_path.display(), "previous ledger backed up");
        self.prune_backups()
    }

    /// `<stem>_<YYYYMMDD_HHMMSS>.json`, or `..._<HHMMSS>-<n>.json` numbered
    /// after any backups already taken in the same second.
    fn next_backup_path(&self, at: DateTime<Utc>) -> Result<PathBuf, BillingError> {
        let base = format!("{}_{}", self.stem(), at.format(BACKUP_TIMESTAMP_FORMAT));
        let taken = self
            .list_backups()?
            .iter()
            .filter(|name| name.starts_with(&base))
            .filter_map(|name| parse_backup_name(name))
            .map(|(_, sequence)| sequence)
            .max();
        let file_name = match taken {
            None => format!("{base}.{BACKUP_EXTENSION}"),
            Some(sequence) => format!("{base}-{}.{BACKUP_EXTENSION}", sequence + 1),
        };
        Ok(self.backups_dir.join(file_name))
    }

    fn prune_backups(&self) -> Result<(), BillingError> {
        for name in self.list_backups()?.into_iter().skip(self.retention) {
            let _ = std_fs::remove_file(self.backups_dir.join(name));
        }
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> Result<Ledger, BillingError> {
        if !self.path.exists() {
            return Ok(Ledger::new());
        }
        let data = std_fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Ledger::new());
        }
        serde_json::from_str(&data).map_err(|err| {
            BillingError::Storage(format!(
                "ledger `{}` could not be read: {err}",
                self.path.display()
            ))
        })
    }

    fn save(&self, ledger: &Ledger) -> Result<(), BillingError> {
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(ledger)?;
        fs::write_atomic(&self.path, &json)?;
        Ok(())
    }
}

/// Timestamp and same-second sequence number encoded in a backup name.
fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let mut segments = trimmed.rsplitn(3, '_');
    let time_part = segments.next()?;
    let date_part = segments.next()?;
    let (time_part, sequence) = match time_part.split_once('-') {
        Some((time, sequence)) => (time, sequence.parse().ok()?),
        None => (time_part, 0),
    };
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S").ok()?;
    Some((DateTime::from_naive_utc_and_offset(naive, Utc), sequence))
}
