//! CSV statement import
//!
//! Parses bank statement exports with the fixed header
//! `date,amount,currency,category,description,is_savings,is_deduction,is_fixed`
//! into transactions, converting every amount into the workspace base
//! currency. Row errors carry the file name and line number.

use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{CashplanError, CashplanResult};
use crate::models::{Money, Transaction};
use crate::storage::RateTable;

/// A parsed statement: its transactions plus the source content hash
#[derive(Debug, Clone)]
pub struct CsvBatch {
    pub transactions: Vec<Transaction>,
    /// SHA-256 hex digest of the raw file bytes
    pub content_hash: String,
    pub source_file: String,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: String,
    currency: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_savings: String,
    #[serde(default)]
    is_deduction: String,
    #[serde(default)]
    is_fixed: String,
}

/// Read and parse a statement file
pub fn read_statement(path: &Path, rates: &RateTable) -> CashplanResult<CsvBatch> {
    let bytes = std::fs::read(path)?;
    let content_hash = hex::encode(Sha256::digest(&bytes));
    let source_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("statement.csv")
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let mut transactions = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row: CsvRow = result?;
        // header is line 1, first record line 2
        let line = transactions.len() + 2;
        let tx = parse_row(&row, rates, &source_file)
            .map_err(|e| row_error(&source_file, line, e))?;
        transactions.push(tx);
    }

    debug!(file = %source_file, rows = transactions.len(), "parsed statement");
    Ok(CsvBatch {
        transactions,
        content_hash,
        source_file,
    })
}

fn parse_row(row: &CsvRow, rates: &RateTable, source_file: &str) -> CashplanResult<Transaction> {
    let date = chrono::NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
        .map_err(|_| CashplanError::validation("date", format!("invalid date '{}'", row.date)))?;

    let amount = Money::parse(&row.amount)
        .map_err(|_| CashplanError::validation("amount", format!("invalid amount '{}'", row.amount)))?;
    let amount = rates.to_base(amount, &row.currency)?;

    let mut tx = Transaction::new(
        date,
        amount,
        rates.base_currency.clone(),
        row.category.clone(),
        row.description.clone(),
    )
    .with_flags(
        parse_flag("is_savings", &row.is_savings)?,
        parse_flag("is_deduction", &row.is_deduction)?,
        parse_flag("is_fixed", &row.is_fixed)?,
    );
    tx.source_file = Some(source_file.to_string());

    tx.validate()?;
    Ok(tx)
}

/// Accepts true/false, 1/0 and yes/no, case-insensitive; empty means false
fn parse_flag(field: &'static str, token: &str) -> CashplanResult<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => Err(CashplanError::validation(
            field,
            format!("invalid boolean '{other}'"),
        )),
    }
}

fn row_error(file: &str, line: usize, source: CashplanError) -> CashplanError {
    CashplanError::Import(format!("{file}:{line}: {source}"))
}
