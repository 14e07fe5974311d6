//! Self-contained HTML receipts written next to the ledger.

use std::{error::Error as _, path::PathBuf};

use billing_config::BillingConfig;
use billing_core::{receipt_file_name, ReceiptError, ReceiptRenderer};
use billing_domain::{ApartmentProfile, BillingPeriod, ChargeBreakdown, RateSchedule, ReceiptRef};
use billing_storage_json::fs::write_atomic;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

/// The `.html` suffix turns on autoescaping for every interpolated value.
const TEMPLATE_NAME: &str = "receipt.html";
const RECEIPT_TEMPLATE: &str = include_str!("receipt.html");

#[derive(Serialize)]
struct ReceiptRow<'a> {
    label: &'a str,
    rate: String,
    unit: &'static str,
    calculation: String,
    amount: i64,
}

/// Writes one `receipt_<period>_<apartment>.html` per charge.
#[derive(Debug, Clone)]
pub struct HtmlReceiptRenderer {
    tera: Tera,
    receipts_dir: PathBuf,
    link_prefix: String,
    building_name: String,
    payment_due_day: u32,
    generated_at: DateTime<Utc>,
}

impl HtmlReceiptRenderer {
    pub fn new(receipts_dir: PathBuf, link_prefix: impl Into<String>) -> Result<Self, ReceiptError> {
        let defaults = BillingConfig::default();
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, RECEIPT_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self {
            tera,
            receipts_dir,
            link_prefix: link_prefix.into(),
            building_name: defaults.building_name,
            payment_due_day: defaults.payment_due_day,
            generated_at: Utc::now(),
        })
    }

    pub fn from_config(
        config: &BillingConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ReceiptError> {
        let mut renderer = Self::new(
            config.receipts_dir.clone(),
            config.receipt_link_prefix.clone(),
        )?;
        renderer.building_name = config.building_name.clone();
        renderer.payment_due_day = config.payment_due_day;
        renderer.generated_at = generated_at;
        Ok(renderer)
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Reference stored in the ledger, always with forward slashes.
    pub fn link_for(&self, file_name: &str) -> ReceiptRef {
        let prefix = self.link_prefix.replace('\\', "/");
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            ReceiptRef::new(file_name)
        } else {
            ReceiptRef::new(format!("{prefix}/{file_name}"))
        }
    }

    pub fn document(
        &self,
        profile: &ApartmentProfile,
        period: BillingPeriod,
        breakdown: &ChargeBreakdown,
    ) -> Result<String, ReceiptError> {
        let rows: Vec<ReceiptRow> = breakdown
            .lines()
            .iter()
            .map(|line| ReceiptRow {
                label: &line.label,
                rate: line.unit_rate.to_string(),
                unit: line.group.unit_label(),
                calculation: line.quantity_expression(),
                amount: line.amount,
            })
            .collect();

        let mut context = Context::new();
        context.insert("building_name", &self.building_name);
        context.insert("period", &period.to_string());
        context.insert(
            "generated_at",
            &self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        context.insert("apartment", &profile.id);
        context.insert("owner", &profile.owner);
        context.insert("area", &profile.area_sqm.to_string());
        context.insert("rows", &rows);
        context.insert("total", &breakdown.total());
        context.insert("payment_due_day", &self.payment_due_day);

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(template_error)
    }
}

impl ReceiptRenderer for HtmlReceiptRenderer {
    fn render(
        &mut self,
        profile: &ApartmentProfile,
        _rates: &RateSchedule,
        period: BillingPeriod,
        breakdown: &ChargeBreakdown,
    ) -> Result<ReceiptRef, ReceiptError> {
        let file_name = receipt_file_name(period, profile.id);
        let path = self.receipts_dir.join(&file_name);
        let html = self.document(profile, period, breakdown)?;
        write_atomic(&path, &html).map_err(|source| ReceiptError::Write { path, source })?;
        Ok(self.link_for(&file_name))
    }
}

/// Flattens a tera error and its causes into one message.
fn template_error(err: tera::Error) -> ReceiptError {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    ReceiptError::Template(message)
}
