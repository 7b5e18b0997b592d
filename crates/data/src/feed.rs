//! CSV signal feed with required-column validation.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;
use trigger_trade_core::{SignalRow, SignalSource};

/// Columns the upstream feed must provide. A missing column is a
/// configuration error for the whole cycle, not a row defect.
const REQUIRED_COLUMNS: &[&str] = &[
    "SignalDate",
    "SignalTime",
    "Symbol",
    "Signal",
    "BidPrice",
    "AskPrice",
    "LastPrice",
    "EqPrice",
    "EqLevel",
    "Bias",
];

/// File-backed signal source re-read on every cycle.
pub struct CsvSignalSource {
    path: PathBuf,
}

impl CsvSignalSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_rows(&self) -> Result<Vec<SignalRow>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open signal feed: {}", self.path.display()))?;
        let headers = reader.headers()?.clone();

        let index: HashMap<&str, usize> = REQUIRED_COLUMNS
            .iter()
            .filter_map(|column| {
                headers
                    .iter()
                    .position(|header| header == *column)
                    .map(|i| (*column, i))
            })
            .collect();
        if index.len() != REQUIRED_COLUMNS.len() {
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .filter(|column| !index.contains_key(**column))
                .copied()
                .collect();
            bail!(
                "signal feed {} is missing required columns: {missing:?}",
                self.path.display()
            );
        }

        let field = |record: &csv::StringRecord, column: &str| {
            index
                .get(column)
                .and_then(|&i| record.get(i))
                .unwrap_or("")
                .to_string()
        };

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(SignalRow {
                date: field(&record, "SignalDate"),
                time: field(&record, "SignalTime"),
                symbol: field(&record, "Symbol"),
                signal: field(&record, "Signal"),
                bid: field(&record, "BidPrice"),
                ask: field(&record, "AskPrice"),
                last: field(&record, "LastPrice"),
                eq_price: field(&record, "EqPrice"),
                eq_level: field(&record, "EqLevel"),
                bias: field(&record, "Bias"),
            });
        }
        Ok(rows)
    }
}

#[async_trait]
impl SignalSource for CsvSignalSource {
    async fn fetch(&mut self) -> Result<Option<Vec<SignalRow>>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "signal feed not present");
            return Ok(None);
        }
        self.read_rows().map(Some)
    }
}
