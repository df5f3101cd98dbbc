//! User settings for the finance tracker
//!
//! Settings live in `config.json` under the base directory. A missing file
//! is created with the defaults, and every field falls back to its default
//! individually.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Prefix used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Window used by the "recent" filter, in days
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,

    /// File name of the transaction store inside the data directory
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rs ".to_string()
}

fn default_recent_days() -> u32 {
    7
}

fn default_transactions_file() -> String {
    "transactions.txt".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            recent_days: default_recent_days(),
            transactions_file: default_transactions_file(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults out first if the file
    /// doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            debug!(path = %settings_path.display(), "wrote default settings");
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
