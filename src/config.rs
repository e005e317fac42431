//! Runtime settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Table file used when `--csv` is not given
pub const DEFAULT_CSV_PATH: &str = "databricks_workshops_EST.csv";

/// Browser-like User-Agent sent with every page request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Settings shared by the fetcher, store and comparator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Path of the workshop table file
    pub csv_path: PathBuf,
    /// User-Agent header for page requests
    pub user_agent: String,
    /// Scraped description must be longer than `current * growth_threshold`
    /// characters before an update is recommended (default: 1.2)
    pub growth_threshold: f64,
    /// Characters shown of each description in an update report (default: 100)
    pub preview_chars: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            growth_threshold: 1.2,
            preview_chars: 100,
        }
    }
}

impl SyncConfig {
    /// Use a different table file
    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }
}
