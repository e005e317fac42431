//! Error types for workshop-sync
//!
//! Fetch and store failures each get their own `thiserror` enum and fold into
//! the top-level [`Error`]. Most callers never see these: the fetch and store
//! entry points used by the driver log the error and degrade to "no content"
//! or "zero records" instead.

use thiserror::Error;

/// The main error type for workshop-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// Page retrieval errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Table file errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while retrieving an event page
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("Request to {url} failed: {message}")]
    Request {
        /// URL that was requested
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Server answered with a non-success status
    #[error("HTTP error {status} from {url}")]
    Http {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },
}

/// Errors raised by the table store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The table has no column with this name
    #[error("Table has no column named {0:?}")]
    MissingColumn(String),
}

/// Result type alias for workshop-sync operations
pub type Result<T> = std::result::Result<T, Error>;

impl FetchError {
    /// Wrap a reqwest transport error together with the offending URL
    pub fn request(url: &str, err: &reqwest::Error) -> Self {
        FetchError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
