// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV cash flow report.

use crate::models::{Totals, Transaction};
use crate::utils::{display_date_id, fmt_idr};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const HEADER: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

const BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no transactions to export")]
    Empty,
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render the report: BOM, header, one quoted row per transaction, a blank
/// line, then total income, total expense and balance rows.
pub fn export_csv(transactions: &[Transaction], totals: &Totals) -> Result<String, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut out = Vec::from(BOM.as_bytes());
    {
        let mut header = writer(&mut out, QuoteStyle::Necessary);
        header.write_record(HEADER)?;
        header.flush()?;
    }
    {
        let mut wtr = writer(&mut out, QuoteStyle::Always);
        for t in transactions {
            wtr.write_record([
                display_date_id(t.date),
                t.kind.label().to_string(),
                t.category.name().to_string(),
                fmt_idr(&t.amount),
                t.description.clone(),
            ])?;
        }
        wtr.flush()?;
    }
    out.push(b'\n');
    {
        let mut wtr = writer(&mut out, QuoteStyle::Always);
        for (label, amount) in [
            ("Total Income", &totals.income),
            ("Total Expense", &totals.expense),
            ("Balance", &totals.balance),
        ] {
            wtr.write_record([label, "", "", fmt_idr(amount).as_str(), ""])?;
        }
        wtr.flush()?;
    }
    // Every byte comes from a &str, so this only guards the invariant.
    Ok(String::from_utf8(out)?)
}

fn writer(out: &mut Vec<u8>, style: QuoteStyle) -> csv::Writer<&mut Vec<u8>> {
    WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// One file name per calendar day, so exports on the same day replace each
/// other.
pub fn export_filename(date: NaiveDate) -> String {
    format!("arus-kas-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the report for `date` into `dir` and return the file path.
pub fn write_export(
    dir: &Path,
    date: NaiveDate,
    transactions: &[Transaction],
    totals: &Totals,
) -> Result<PathBuf, ExportError> {
    let body = export_csv(transactions, totals)?;
    let path = dir.join(export_filename(date));
    std::fs::write(&path, body)?;
    info!(path = %path.display(), rows = transactions.len(), "exported report");
    Ok(path)
}
