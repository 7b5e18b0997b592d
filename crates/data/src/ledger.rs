//! Durable execution ledger: the set of already-dispatched signals.
//!
//! Append-only CSV with one ledger key per line. The full set is read at
//! startup to reconstruct dedup state; appends are flushed before
//! returning so a crash after marking can never replay a signal.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

pub struct ExecutionLedger {
    path: PathBuf,
    seen: HashSet<String>,
}

impl ExecutionLedger {
    /// Opens the ledger, loading every previously recorded identity.
    /// A missing file is an empty ledger, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing ledger file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut seen = HashSet::new();

        if path.exists() {
            let mut reader = csv::Reader::from_path(&path)
                .with_context(|| format!("Failed to open execution ledger: {}", path.display()))?;
            for result in reader.records() {
                let record = result?;
                if let Some(key) = record.get(0) {
                    if !key.is_empty() {
                        seen.insert(key.to_string());
                    }
                }
            }
            info!(entries = seen.len(), path = %path.display(), "execution ledger loaded");
        }

        Ok(Self { path, seen })
    }

    /// Membership test; consulted before dispatch.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Marks identities as processed, durably.
    ///
    /// Keys already present are not rewritten. The write is flushed before
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger file cannot be appended to; callers
    /// treat this as fatal.
    pub fn append(&mut self, keys: &[String]) -> Result<()> {
        let fresh: Vec<&String> = keys.iter().filter(|key| !self.seen.contains(*key)).collect();
        if fresh.is_empty() {
            return Ok(());
        }

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to append to ledger: {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(["SignalKey"])?;
        }
        for key in &fresh {
            writer.write_record([key.as_str()])?;
        }
        writer.flush()?;

        for key in fresh {
            self.seen.insert(key.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ExecutionLedger::open(dir.path().join("ledger.csv")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn appended_keys_are_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut ledger = ExecutionLedger::open(&path).unwrap();

        ledger
            .append(&["2025-08-01 09:30:00|AAPL|LongTrigger".to_string()])
            .unwrap();
        assert!(ledger.contains("2025-08-01 09:30:00|AAPL|LongTrigger"));
        assert!(!ledger.contains("2025-08-01 09:31:00|AAPL|LongTrigger"));
    }

    #[test]
    fn membership_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");

        {
            let mut ledger = ExecutionLedger::open(&path).unwrap();
            ledger
                .append(&[
                    "2025-08-01 09:30:00|AAPL|LongTrigger".to_string(),
                    "2025-08-01 09:30:00|EURUSD|ShortTrigger".to_string(),
                ])
                .unwrap();
        }

        let reopened = ExecutionLedger::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(reopened.contains("2025-08-01 09:30:00|AAPL|LongTrigger"));
        assert!(reopened.contains("2025-08-01 09:30:00|EURUSD|ShortTrigger"));
    }

    #[test]
    fn duplicate_appends_are_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");

        {
            let mut ledger = ExecutionLedger::open(&path).unwrap();
            let keys = vec!["2025-08-01 09:30:00|AAPL|LongTrigger".to_string()];
            ledger.append(&keys).unwrap();
            ledger.append(&keys).unwrap();
        }

        let reopened = ExecutionLedger::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        // Header plus exactly one data line
        assert_eq!(contents.lines().count(), 2);
    }
}
