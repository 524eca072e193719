//! Custom error types for pubmed-paper-fetcher.
//!
//! All library functions return `Result<T, FetcherError>` instead of using `unwrap()`.
//! Detail fetches are the exception: they never fail and degrade to a sentinel
//! [`PaperRecord`](crate::paper::PaperRecord) instead.

use thiserror::Error;

/// Main error type for pubmed-paper-fetcher operations.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// Network/HTTP transport error (includes timeouts)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// E-utilities returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// Structural parse error (missing fields, truncated document)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier search failed; aborts the whole batch
    #[error("Failed to fetch PubMed IDs: {0}")]
    Search(Box<FetcherError>),
}

impl FetcherError {
    /// Wrap any error as a batch-fatal search failure
    pub fn search(cause: impl Into<FetcherError>) -> Self {
        FetcherError::Search(Box::new(cause.into()))
    }
}

/// Result type alias using `FetcherError`
pub type Result<T> = std::result::Result<T, FetcherError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| FetcherError::Parse(msg.to_string()))
    }
}
