//! One complete billing pass: load, merge, persist.

use std::path::{Path, PathBuf};

use billing_config::BillingConfig;
use billing_core::{
    BillingError, ChargeCalculator, Clock, InputSource, LedgerMerger, LedgerStore,
    PeriodResolver, YearlyStatement,
};
use billing_domain::{ApartmentId, BillingPeriod, LedgerEntry};
use billing_storage_json::{
    ensure_inputs_exist, export_ledger_csv, load_apartments, load_rate_schedule, JsonLedgerStore,
};
use tracing::{info, warn};

use crate::receipt::HtmlReceiptRenderer;

/// What a billing run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub period: BillingPeriod,
    pub new_entries: Vec<LedgerEntry>,
    pub skipped: Vec<ApartmentId>,
    pub ledger_len: usize,
    pub ledger_path: PathBuf,
}

impl RunReport {
    pub fn billed_total(&self) -> i64 {
        self.new_entries.iter().map(|entry| entry.amount).sum()
    }
}

fn ledger_store(config: &BillingConfig) -> JsonLedgerStore {
    JsonLedgerStore::new(config.ledger_path.clone()).with_retention(config.backup_retention)
}

/// Bills every apartment lacking an entry for the month after `clock.today()`.
///
/// Inputs are validated before the first receipt is written and the ledger
/// is rewritten only once every new charge has its receipt. A run that adds
/// nothing leaves the ledger and its backups untouched.
pub fn run(config: &BillingConfig, clock: &dyn Clock) -> Result<RunReport, BillingError> {
    ensure_inputs_exist(&[
        (InputSource::RateSchedule, config.rates_path.as_path()),
        (InputSource::ApartmentList, config.apartments_path.as_path()),
    ])?;
    let rates = load_rate_schedule(&config.rates_path)?;
    let profiles = load_apartments(&config.apartments_path)?;
    ChargeCalculator::validate(&rates, &config.schema)?;

    let store = ledger_store(config);
    let existing = store.load()?;
    for warning in existing.warnings() {
        warn!(%warning, "ledger anomaly");
    }

    let period = PeriodResolver::resolve_with(clock);
    info!(
        %period,
        apartments = profiles.len(),
        existing = existing.len(),
        "billing run started"
    );

    let mut renderer = HtmlReceiptRenderer::from_config(config, clock.now())?;
    let outcome = LedgerMerger::merge(
        &existing,
        &profiles,
        &rates,
        &config.schema,
        period,
        &mut renderer,
    )?;

    if outcome.new_entries.is_empty() {
        info!(%period, skipped = outcome.skipped.len(), "nothing to bill; ledger left as is");
    } else {
        store.save(&outcome.ledger)?;
        info!(
            %period,
            added = outcome.new_entries.len(),
            skipped = outcome.skipped.len(),
            total = outcome.ledger.len(),
            ledger = %store.path().display(),
            "ledger updated"
        );
    }

    Ok(RunReport {
        period,
        new_entries: outcome.new_entries,
        skipped: outcome.skipped,
        ledger_len: outcome.ledger.len(),
        ledger_path: store.path().to_path_buf(),
    })
}

/// Reads the ledger and summarises one apartment's charges for `year`.
pub fn statement(
    config: &BillingConfig,
    apartment: ApartmentId,
    year: i32,
) -> Result<YearlyStatement, BillingError> {
    let ledger = ledger_store(config).load()?;
    Ok(YearlyStatement::for_apartment(&ledger, apartment, year))
}

/// Writes the whole ledger to `destination` as CSV and returns the row count.
pub fn export(config: &BillingConfig, destination: &Path) -> Result<usize, BillingError> {
    let ledger = ledger_store(config).load()?;
    let rows = export_ledger_csv(&ledger, destination)?;
    info!(rows, destination = %destination.display(), "ledger exported");
    Ok(rows)
}
