//! CSV interchange: ledger export and apartment list import.

use std::path::Path;

use billing_core::BillingError;
use billing_domain::{ApartmentProfile, Ledger};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::fs::write_atomic;

const LEDGER_HEADERS: [&str; 5] = ["apartment", "month", "amount", "status", "receipt_link"];
const ID_HEADERS: &[&str] = &["apartment", "flatnumber", "id"];
const AREA_HEADERS: &[&str] = &["area_sqm", "area"];
const OWNER_HEADER: &str = "owner";

#[derive(Serialize)]
struct LedgerRow<'a> {
    apartment: u32,
    month: String,
    amount: i64,
    status: &'a str,
    receipt_link: &'a str,
}

/// Writes every ledger entry as one CSV row, header first, and returns the
/// number of rows written.
pub fn export_ledger_csv(ledger: &Ledger, path: &Path) -> Result<usize, BillingError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(LEDGER_HEADERS).map_err(export_error)?;
    for entry in ledger.entries() {
        writer
            .serialize(LedgerRow {
                apartment: entry.apartment.get(),
                month: entry.period.to_string(),
                amount: entry.amount,
                status: entry.status.label(),
                receipt_link: entry.receipt.as_str(),
            })
            .map_err(export_error)?;
    }
    let data = writer
        .into_inner()
        .map_err(|err| BillingError::Storage(format!("CSV export failed: {err}")))?;
    let text = String::from_utf8(data)
        .map_err(|err| BillingError::Storage(format!("CSV export failed: {err}")))?;
    write_atomic(path, &text)?;
    Ok(ledger.len())
}

/// Parses an apartment list with a header row. Recognised columns are the
/// apartment number (`apartment`, `flatNumber` or `id`), the area (`area_sqm`
/// or `area`) and `owner`; any other column becomes an attribute such as
/// `has_video`. Empty cells are skipped.
pub fn parse_apartments_csv(data: &str) -> Result<Vec<ApartmentProfile>, String> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| err.to_string())?
        .iter()
        .map(|header| header.to_ascii_lowercase())
        .collect();
    let id_column = find_column(&headers, ID_HEADERS).ok_or("no apartment number column")?;
    let area_column = find_column(&headers, AREA_HEADERS).ok_or("no area column")?;

    let mut profiles = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| err.to_string())?;
        let row = index + 2;
        let raw_id = cell(&record, id_column);
        let id: u32 = raw_id
            .parse()
            .map_err(|_| format!("row {row}: invalid apartment number `{raw_id}`"))?;
        let raw_area = cell(&record, area_column);
        let area: f64 = raw_area
            .parse()
            .map_err(|_| format!("row {row}: invalid area `{raw_area}`"))?;

        let mut profile = ApartmentProfile::new(id, area);
        for (column, header) in headers.iter().enumerate() {
            let raw = cell(&record, column);
            if column == id_column || column == area_column || raw.is_empty() {
                continue;
            }
            if header == OWNER_HEADER {
                profile.owner = Some(raw.to_string());
            } else {
                profile.attributes.insert(header.clone(), cell_value(raw));
            }
        }
        profiles.push(profile);
    }
    Ok(profiles)
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.as_str()))
}

fn cell(record: &StringRecord, column: usize) -> &str {
    record.get(column).unwrap_or("")
}

fn cell_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => Value::Bool(true),
        "false" | "no" => Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

fn export_error(err: csv::Error) -> BillingError {
    BillingError::Storage(format!("CSV export failed: {err}"))
}
