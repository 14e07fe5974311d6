use std::fmt;

use colored::Colorize;

use billing_core::YearlyStatement;

use crate::runner::RunReport;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => text.bright_yellow().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    println!("{}", apply_style(kind, message));
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn run_report(report: &RunReport) {
    section(format!("Billing period {}", report.period));
    for entry in &report.new_entries {
        info(format!(
            "Apartment {}: {} ({})",
            entry.apartment, entry.amount, entry.receipt
        ));
    }
    if !report.skipped.is_empty() {
        let skipped: Vec<String> = report.skipped.iter().map(ToString::to_string).collect();
        info(format!("Already billed: {}", skipped.join(", ")));
    }
    if report.new_entries.is_empty() {
        warning("No new charges; every apartment is already billed for this period.");
    } else {
        success(format!(
            "{} new charge(s) totalling {}",
            report.new_entries.len(),
            report.billed_total()
        ));
    }
    info(format!(
        "Ledger {} now holds {} entries.",
        report.ledger_path.display(),
        report.ledger_len
    ));
}

pub fn yearly_statement(statement: &YearlyStatement) {
    section(format!(
        "Apartment {} statement for {}",
        statement.apartment, statement.year
    ));
    if statement.is_empty() {
        warning("No charges recorded for this year.");
        return;
    }
    for entry in &statement.entries {
        info(format!(
            "{}  {:>8}  {}",
            entry.period, entry.amount, entry.status
        ));
    }
    success(format!("Total billed: {}", statement.total_billed));
}
