use std::path::Path;

use calamine::{Data, Reader};
use rusqlite::Connection;

use crate::categorizer::{self, RuleSet, UNKNOWN_CATEGORY};
use crate::db::{append, remove_duplicates, size};
use crate::error::{GuilderError, Result};
use crate::models::{RawStatementRow, StagedRow};
use crate::parser::parse_description;
use crate::reconciler::reconcile;

/// Placeholder for sub-fields the description parser could not recover.
pub const NOT_PROVIDED: &str = "NOTPROVIDED";

// Column names of the bank's native export. Bank-specific configuration,
// not protocol.
const COL_IBAN: &str = "accountNumber";
const COL_CURRENCY: &str = "mutationcode";
const COL_DATE: &str = "transactiondate";
const COL_VALUE_DATE: &str = "valuedate";
const COL_START_BALANCE: &str = "startsaldo";
const COL_END_BALANCE: &str = "endsaldo";
const COL_AMOUNT: &str = "amount";
const COL_DESCRIPTION: &str = "description";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a statement amount, accepting both `1234.56` and the Dutch
/// `1.234,56` style. Malformed values are fatal: storing a fabricated zero
/// would corrupt the ledger silently.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<f64>() {
        return Ok(v);
    }
    s.replace('.', "")
        .replace(',', ".")
        .parse()
        .map_err(|_| GuilderError::InvalidAmount(raw.to_string()))
}

/// Reformat the bank-native 8-digit date into ISO 8601.
pub fn reformat_date(raw: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| GuilderError::InvalidDate(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Statement readers
// ---------------------------------------------------------------------------

struct ColumnMap {
    iban: usize,
    currency: usize,
    date: usize,
    value_date: usize,
    start_balance: usize,
    end_balance: usize,
    amount: usize,
    description: usize,
}

fn resolve_columns<'a, I: Iterator<Item = &'a str>>(headers: I) -> Result<ColumnMap> {
    let headers: Vec<&str> = headers.map(str::trim).collect();
    let find = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| GuilderError::MissingColumn(name.to_string()))
    };
    Ok(ColumnMap {
        iban: find(COL_IBAN)?,
        currency: find(COL_CURRENCY)?,
        date: find(COL_DATE)?,
        value_date: find(COL_VALUE_DATE)?,
        start_balance: find(COL_START_BALANCE)?,
        end_balance: find(COL_END_BALANCE)?,
        amount: find(COL_AMOUNT)?,
        description: find(COL_DESCRIPTION)?,
    })
}

/// Read the export into raw rows. `.xls`/`.xlsx` go through calamine;
/// everything else is treated as delimited text (tab for `.txt`/`.tab`,
/// comma otherwise).
pub fn read_statement(file_path: &Path) -> Result<Vec<RawStatementRow>> {
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "xls" | "xlsx" => read_spreadsheet(file_path),
        "txt" | "tab" => read_delimited(file_path, b'\t'),
        _ => read_delimited(file_path, b','),
    }
}

fn read_delimited(file_path: &Path, delimiter: u8) -> Result<Vec<RawStatementRow>> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(std::io::BufReader::new(file));

    let cols = resolve_columns(rdr.headers()?.iter())?;
    let mut rows = Vec::new();
    for result in rdr.records() {
        // A record whose field count differs from the header is a csv error
        // here; the whole batch aborts.
        let record = result?;
        let get = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        rows.push(RawStatementRow {
            date: get(cols.date),
            amount: parse_amount(&get(cols.amount))?,
            description: record.get(cols.description).unwrap_or("").to_string(),
            start_balance: opt_amount(&get(cols.start_balance))?,
            end_balance: opt_amount(&get(cols.end_balance))?,
            currency: get(cols.currency),
            value_date: get(cols.value_date),
            iban: get(cols.iban),
        });
    }
    Ok(rows)
}

fn read_spreadsheet(file_path: &Path) -> Result<Vec<RawStatementRow>> {
    let mut workbook = calamine::open_workbook_auto(file_path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GuilderError::Other("Spreadsheet has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut iter = range.rows();
    let header_row = iter
        .next()
        .ok_or_else(|| GuilderError::Other("Spreadsheet is empty".to_string()))?;
    let headers: Vec<String> = header_row.iter().map(cell_string).collect();
    let cols = resolve_columns(headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for row in iter {
        // Spreadsheet exports can carry trailing rows of empty cells; those
        // are layout, not data. Anything else must parse or the batch aborts.
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        rows.push(RawStatementRow {
            date: cell_at(row, cols.date),
            amount: cell_number(row, cols.amount)?
                .ok_or_else(|| GuilderError::InvalidAmount(String::new()))?,
            description: cell_at(row, cols.description),
            start_balance: cell_number(row, cols.start_balance)?,
            end_balance: cell_number(row, cols.end_balance)?,
            currency: cell_at(row, cols.currency),
            value_date: cell_at(row, cols.value_date),
            iban: cell_at(row, cols.iban),
        });
    }
    Ok(rows)
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        // Dates and references come back as floats from .xls exports.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_at(row: &[Data], idx: usize) -> String {
    row.get(idx).map(cell_string).unwrap_or_default()
}

fn cell_number(row: &[Data], idx: usize) -> Result<Option<f64>> {
    match row.get(idx) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Float(f)) => Ok(Some(*f)),
        Some(Data::Int(i)) => Ok(Some(*i as f64)),
        Some(Data::String(s)) => opt_amount(s),
        Some(other) => Err(GuilderError::InvalidAmount(other.to_string())),
    }
}

fn opt_amount(raw: &str) -> Result<Option<f64>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_amount(raw).map(Some)
    }
}

// ---------------------------------------------------------------------------
// Normalization pipeline
// ---------------------------------------------------------------------------

/// Pure per-row transform: raw export row in, canonical-shaped row out.
/// Parses the description, fills absent sub-fields with the sentinel,
/// reformats the date, reconciles relay-payment noise and derives direction.
/// Bank-specific columns (IBAN, currency, value date, raw description) are
/// dropped here.
pub fn stage_row(raw: &RawStatementRow) -> Result<StagedRow> {
    let fields = parse_description(&raw.description);
    // Structured-grammar labels keep the bank's casing; match them loosely.
    let field = |key: &str| {
        fields
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| NOT_PROVIDED.to_string())
    };

    let date = reformat_date(&raw.date)?;
    let reconciled = reconcile(&field("name"), &field("remi"));

    Ok(StagedRow {
        date,
        start_balance: raw.start_balance,
        end_balance: raw.end_balance,
        amount: raw.amount.abs(),
        name: reconciled.name,
        description: reconciled.remittance,
        location: field("location"),
        incoming: raw.amount > 0.0,
        category: UNKNOWN_CATEGORY.to_string(),
    })
}

// ---------------------------------------------------------------------------
// ingest_file
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct IngestResult {
    /// Rows read from the statement file.
    pub read: usize,
    pub appended: usize,
    pub duplicates_removed: usize,
    /// Store size after append + dedup.
    pub total: i64,
}

/// Run one batch import: read, normalize, categorize, append, deduplicate.
/// Append and dedup share a transaction so a crash cannot leave duplicate
/// rows committed without the dedup pass having run.
pub fn ingest_file(conn: &mut Connection, file_path: &Path, rules: &RuleSet) -> Result<IngestResult> {
    let raw_rows = read_statement(file_path)?;
    let mut staged = raw_rows
        .iter()
        .map(stage_row)
        .collect::<Result<Vec<_>>>()?;
    categorizer::categorize(rules, &mut staged);

    let tx = conn.transaction()?;
    let appended = append(&tx, &staged)?;
    let duplicates_removed = remove_duplicates(&tx)?;
    tx.commit()?;

    Ok(IngestResult {
        read: raw_rows.len(),
        appended,
        duplicates_removed,
        total: size(conn)?,
    })
}
