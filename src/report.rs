//! CSV report emission.
//!
//! Fields containing the delimiter, quotes or newlines are quoted per
//! RFC 4180 by the `csv` writer.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::portfolio::SummaryRow;

/// Writes the CSV reports into the output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a TransactionKind,
    amount: Decimal,
    code: &'a str,
    usd: Decimal,
    price: Decimal,
    fee: Decimal,
    date: String,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `transactions.csv` with human-readable dates.
    pub fn write_transactions(&self, transactions: &[Transaction]) -> Result<PathBuf> {
        let rows = transactions.iter().map(|t| TransactionRow {
            id: &t.id,
            kind: &t.kind,
            amount: t.amount,
            code: &t.code,
            usd: t.usd,
            price: t.price,
            fee: t.fee,
            date: humanize_date(t.date),
        });
        self.write_csv("transactions", rows)
    }

    /// Write `summary.csv`; blank columns come from `None` fields.
    pub fn write_summary(&self, rows: &[SummaryRow]) -> Result<PathBuf> {
        self.write_csv("summary", rows.iter())
    }

    fn write_csv<S: Serialize>(
        &self,
        name: &str,
        rows: impl Iterator<Item = S>,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Failed to create output directory")?;
        let path = self.output_dir.join(format!("{name}.csv"));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to open report file {:?}", path))?;
        for row in rows {
            writer.serialize(row).context("Failed to write report row")?;
        }
        writer.flush().context("Failed to flush report")?;

        Ok(path)
    }
}

fn humanize_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
