//! Error types for `HuggingFace` operations.
//!
//! These errors are mapped to [`workbench_core::HubPortError`] at the port
//! boundary; only client construction surfaces them directly.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for `HuggingFace` operations.
pub type HfResult<T> = Result<T, HfError>;

/// Errors related to `HuggingFace` API operations.
#[derive(Debug, Error)]
pub enum HfError {
    /// The hub answered with a non-success status.
    #[error("HuggingFace request failed with status {status}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or the status reason
        message: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from HuggingFace API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Writing a downloaded file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = HfError::ApiRequestFailed {
            status: 404,
            message: "Repository not found".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Repository not found"));
    }

    #[test]
    fn test_io_error_message() {
        let error = HfError::io(
            "/tmp/x.gguf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = error.to_string();
        assert!(msg.contains("/tmp/x.gguf"));
        assert!(msg.contains("denied"));
    }
}
