//! CSV schemas for the history and allocation tables.
//!
//! History rows carry both raw and derived columns so exports remain
//! readable on their own, but imports rebuild every entry from the raw
//! columns and recompute the rest.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use safy_core::{AllocationService, CoreError, Result};
use safy_domain::{AllocationTable, CategoryAllocation, Ledger, SavingsEntry};

pub const HISTORY_HEADERS: [&str; 7] = [
    "timestamp",
    "goal",
    "monthly_target",
    "current_saved",
    "remaining",
    "progress_fraction",
    "happiness_fraction",
];

pub const ALLOCATION_HEADERS: [&str; 2] = ["Usage", "Goal Allocation"];

const TIMESTAMP_WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn write_history<W: Write>(writer: W, ledger: &Ledger) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HISTORY_HEADERS).map_err(csv_error)?;
    for entry in ledger.entries() {
        wtr.write_record([
            entry.timestamp.format(TIMESTAMP_WRITE_FORMAT).to_string(),
            format_amount(entry.goal),
            format_amount(entry.monthly_target),
            format_amount(entry.current_saved),
            format_amount(entry.remaining),
            entry.progress_fraction.to_string(),
            entry.happiness_fraction.to_string(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a history table, rebuilding each entry from the raw columns.
///
/// Any malformed row fails the whole read so the caller can keep its
/// current ledger untouched.
pub fn read_history<R: Read>(reader: R) -> Result<Vec<SavingsEntry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let timestamp_ix = require_column(&headers, &["timestamp", "date"])?;
    let goal_ix = require_column(&headers, &["goal"])?;
    let target_ix = require_column(&headers, &["monthly_target", "monthly target"])?;
    let saved_ix = require_column(&headers, &["current_saved", "current saved"])?;

    let mut entries = Vec::new();
    for (row_ix, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let timestamp = parse_timestamp(field(&record, timestamp_ix, row_ix)?)?;
        let goal = parse_number(field(&record, goal_ix, row_ix)?, row_ix)?;
        let monthly_target = parse_number(field(&record, target_ix, row_ix)?, row_ix)?;
        let current_saved = parse_number(field(&record, saved_ix, row_ix)?, row_ix)?;
        entries.push(SavingsEntry::new(
            timestamp,
            goal,
            monthly_target,
            current_saved,
        ));
    }
    Ok(entries)
}

pub fn write_allocations<W: Write>(writer: W, table: &AllocationTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ALLOCATION_HEADERS).map_err(csv_error)?;
    for category in table.categories() {
        wtr.write_record([
            category.usage.clone(),
            format_amount(category.goal_allocation),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads an allocation table.
///
/// Column names vary across exports, so the label and amount columns are
/// located by name where possible and fall back to positions 0 and 1.
/// Non-numeric amounts coerce to 0 rather than failing the row.
pub fn read_allocations<R: Read>(reader: R) -> Result<AllocationTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let label_ix = find_column(&headers, &["usage", "category", "label", "name"]).unwrap_or(0);
    let amount_ix = find_column(
        &headers,
        &["goal allocation", "goal_allocation", "allocation", "amount"],
    )
    .unwrap_or(1);

    let mut categories = Vec::new();
    for (row_ix, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let usage = field(&record, label_ix, row_ix)?.trim().to_string();
        let amount = record
            .get(amount_ix)
            .map(AllocationService::parse_amount)
            .unwrap_or(0.0);
        categories.push(CategoryAllocation::new(usage, amount));
    }
    Ok(AllocationTable::from_categories(categories))
}

pub fn export_history(path: &Path, ledger: &Ledger) -> Result<()> {
    let file = File::create(path)?;
    write_history(file, ledger)
}

pub fn import_history(path: &Path) -> Result<Vec<SavingsEntry>> {
    let file = File::open(path)?;
    read_history(file)
}

pub fn export_allocations(path: &Path, table: &AllocationTable) -> Result<()> {
    let file = File::create(path)?;
    write_allocations(file, table)
}

pub fn import_allocations(path: &Path) -> Result<AllocationTable> {
    let file = File::open(path)?;
    read_allocations(file)
}

/// Parses the timestamp formats seen in the wild: RFC 3339, the common
/// space- and T-separated datetime forms, and bare dates (midnight).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(CoreError::Parse(format!("unrecognized timestamp `{raw}`")))
}

fn parse_number(raw: &str, row_ix: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        CoreError::Parse(format!("row {}: invalid number `{}`", row_ix + 2, raw))
    })
}

fn field<'a>(record: &'a csv::StringRecord, ix: usize, row_ix: usize) -> Result<&'a str> {
    record
        .get(ix)
        .ok_or_else(|| CoreError::Parse(format!("row {}: missing column {}", row_ix + 2, ix)))
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let normalized = header.trim().to_ascii_lowercase();
        names.iter().any(|name| normalized == *name)
    })
}

fn require_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    find_column(headers, names)
        .ok_or_else(|| CoreError::Parse(format!("missing column `{}`", names[0])))
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Parse(err.to_string())
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
