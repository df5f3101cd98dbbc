//! Append-only transaction store
//!
//! Records live one per line in a plain text file. The store can append a
//! record and scan the whole file; it never rewrites or deletes lines.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::models::Transaction;

use super::file_io::{append_line, read_lines};

/// What a full scan found besides the records themselves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Non-blank lines that could not be parsed
    pub skipped: usize,
}

/// Handle to the transaction file
#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a new line
    pub fn append(&self, txn: &Transaction) -> Result<(), TrackerError> {
        append_line(&self.path, &txn.to_line())?;
        debug!(path = %self.path.display(), date = %txn.date, kind = txn.kind.as_str(), "appended transaction");
        Ok(())
    }

    /// Load every readable record in file order.
    ///
    /// A missing file is an empty store. Unreadable lines are skipped.
    pub fn load_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        self.load_all_with_report().map(|(records, _)| records)
    }

    /// Like [`load_all`](Self::load_all), also reporting how many lines were skipped
    pub fn load_all_with_report(&self) -> Result<(Vec<Transaction>, LoadReport), TrackerError> {
        let Some(lines) = read_lines(&self.path)? else {
            debug!(path = %self.path.display(), "store file does not exist yet");
            return Ok((Vec::new(), LoadReport::default()));
        };

        let mut records = Vec::with_capacity(lines.len());
        let mut report = LoadReport::default();

        for (index, raw) in lines.iter().enumerate() {
            let Ok(line) = std::str::from_utf8(raw) else {
                report.skipped += 1;
                warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    "skipping line that is not valid UTF-8"
                );
                continue;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Transaction::from_line(line) {
                Ok(txn) => records.push(txn),
                Err(e) => {
                    report.skipped += 1;
                    warn!(path = %self.path.display(), line = index + 1, "skipping unreadable line: {}", e);
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = records.len(),
            skipped = report.skipped,
            "loaded transactions"
        );

        Ok((records, report))
    }

    /// Load all records, newest first. Records on the same date keep file order.
    pub fn load_sorted(&self) -> Result<Vec<Transaction>, TrackerError> {
        let mut records = self.load_all()?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}

/// Stable sort by date, descending
pub fn sort_newest_first(records: &mut [Transaction]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TransactionStore {
        TransactionStore::new(dir.path().join("data").join("transactions.txt"))
    }

    fn txn(date: &str, kind: TransactionType, minor: i64, label: &str, desc: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            Money::from_minor(minor),
            label,
            desc,
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let (records, report) = store.load_all_with_report().unwrap();
        assert!(records.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let record = txn("2024-03-01", TransactionType::Expense, 1250, "Food", "Lunch");

        store.append(&record).unwrap();

        assert_eq!(store.load_all().unwrap(), vec![record]);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "2024-03-01,expense,1250,Food,Lunch\n"
        );
    }

    #[test]
    fn test_scenario_sorted_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let lunch = txn("2024-03-01", TransactionType::Expense, 1250, "Food", "Lunch");
        let pay = txn("2024-03-02", TransactionType::Income, 500000, "Salary", "March pay");

        store.append(&lunch).unwrap();
        store.append(&pay).unwrap();

        assert_eq!(store.load_all().unwrap(), vec![lunch.clone(), pay.clone()]);
        assert_eq!(store.load_sorted().unwrap(), vec![pay, lunch]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "2024-03-01,expense,1250,Food,Lunch\n\
             2024-03-01,expense,1250,Food\n\
             2024-03-02,expense,300,Food,Coffee, large\n\
             \n\
             not a record\n\
             2024-03-03,income,1000,Gift,Birthday\n",
        )
        .unwrap();

        let (records, report) = store.load_all_with_report().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "Lunch");
        assert_eq!(records[1].description, "Birthday");
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            b"2024-03-01,expense,1250,Food,Lunch\n\
              2024-03-02,expense,800,Food,Caf\xe9\n\
              2024-03-03,income,1000,Gift,Birthday\n",
        )
        .unwrap();

        let (records, report) = store.load_all_with_report().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "Lunch");
        assert_eq!(records[1].description, "Birthday");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_out_of_range_amounts_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "2024-03-01,expense,-5000,Food,Refund\n\
             2024-03-01,income,0,Salary,\n\
             2024-03-01,income,9223372036854775807,Salary,\n\
             2024-03-02,income,1,Gift,\n",
        )
        .unwrap();

        let (records, report) = store.load_all_with_report().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Money::from_minor(1));
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_crlf_and_padding_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "  2024-03-01,expense,1250,Food,Lunch\r\n").unwrap();

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Lunch");
    }

    #[test]
    fn test_same_date_keeps_file_order() {
        let mut records = vec![
            txn("2024-03-01", TransactionType::Expense, 1, "A", "first"),
            txn("2024-03-05", TransactionType::Expense, 2, "B", "newest"),
            txn("2024-03-01", TransactionType::Expense, 3, "C", "second"),
        ];
        sort_newest_first(&mut records);

        let order: Vec<_> = records.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["newest", "first", "second"]);
    }

    #[test]
    fn test_unwritable_path_propagates() {
        let temp_dir = TempDir::new().unwrap();
        // The store path is an existing directory, so opening it for append fails
        let store = TransactionStore::new(temp_dir.path().to_path_buf());
        let record = txn("2024-03-01", TransactionType::Expense, 1250, "Food", "Lunch");

        assert!(matches!(store.append(&record), Err(TrackerError::Storage(_))));
    }
}
