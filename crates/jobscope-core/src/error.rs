use std::time::Duration;

use thiserror::Error;

/// Application-wide error types for jobscope.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (fetching a page).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid run configuration (bad base URL, zero pages, ...).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A listing selector could not be compiled.
    #[error("Extractor error: {0}")]
    ExtractorError(String),

    /// Reading or writing the tabular output file failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Rendering the report image failed.
    #[error("Chart error: {0}")]
    ChartError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if this error only affects a single page fetch.
    ///
    /// Page-level failures are logged and skipped by the scrape loop;
    /// everything else aborts the run.
    pub fn is_page_local(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_local_errors() {
        assert!(AppError::HttpError("HTTP 503".into()).is_page_local());
        assert!(AppError::Timeout(Duration::from_secs(10)).is_page_local());
        assert!(AppError::NetworkError("reset".into()).is_page_local());
        assert!(!AppError::ConfigError("bad url".into()).is_page_local());
        assert!(!AppError::ChartError("io".into()).is_page_local());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AppError::Timeout(Duration::from_secs(10)).to_string(),
            "Request timed out after 10s"
        );
        assert_eq!(
            AppError::Timeout(Duration::from_millis(500)).to_string(),
            "Request timed out after 500ms"
        );
        assert_eq!(
            AppError::ConfigError("pages must be at least 1".into()).to_string(),
            "Configuration error: pages must be at least 1"
        );
    }
}
