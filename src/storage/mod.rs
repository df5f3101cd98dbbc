//! Storage layer for the finance tracker
//!
//! A single append-only text file holds every transaction. `Storage` resolves
//! where that file lives; `TransactionStore` reads and appends it.

pub mod file_io;
pub mod transactions;

pub use transactions::{sort_newest_first, LoadReport, TransactionStore};

use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerError;

/// Main storage coordinator
pub struct Storage {
    paths: TrackerPaths,
    pub transactions: TransactionStore,
}

impl Storage {
    /// Create a new Storage instance, making sure the data directory exists
    pub fn new(paths: TrackerPaths, settings: &Settings) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionStore::new(paths.transactions_file(&settings.transactions_file)),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }
}
