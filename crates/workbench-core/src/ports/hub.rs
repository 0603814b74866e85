//! Remote model hub port.
//!
//! The core talks to the hub only through [`HubClientPort`]. The reqwest
//! implementation lives in `workbench-hf`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file in a hub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFile {
    /// Path relative to the repository root.
    pub path: String,
    /// Size in bytes (0 when the hub did not report one).
    pub size: u64,
}

impl RepoFile {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Errors from hub operations.
///
/// Implementation-specific errors (HTTP client, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum HubPortError {
    /// The hub answered 401 or 403.
    #[error("Access to '{repo_id}' denied (HTTP {status})")]
    AccessDenied {
        repo_id: String,
        status: u16,
    },

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
    },

    /// Connection, TLS, or timeout failure before a status was received.
    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    /// The hub answered with a body we could not interpret.
    #[error("Invalid hub response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Writing a fetched file to disk failed.
    #[error("Failed to write {path}: {message}")]
    LocalIo {
        path: PathBuf,
        message: String,
    },
}

impl HubPortError {
    /// HTTP status behind the error, when one was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AccessDenied { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

/// Result type alias for hub port operations.
pub type HubPortResult<T> = Result<T, HubPortError>;

/// Port trait for hub operations.
///
/// Implementations neither retry nor back off; failures are surfaced to the
/// caller for classification.
#[async_trait]
pub trait HubClientPort: Send + Sync {
    /// List every file of a repository with its size.
    async fn list_files(
        &self,
        repo_id: &str,
        token: Option<&str>,
    ) -> HubPortResult<Vec<RepoFile>>;

    /// Materialize one file of a repository under `local_dir`, keeping the
    /// repository-relative path. Returns the local path written.
    async fn fetch_file(
        &self,
        repo_id: &str,
        path: &str,
        token: Option<&str>,
        local_dir: &Path,
    ) -> HubPortResult<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn HubClientPort>) {}

    #[test]
    fn test_status() {
        let denied = HubPortError::AccessDenied {
            repo_id: "org/private".to_string(),
            status: 403,
        };
        assert_eq!(denied.status(), Some(403));
        assert!(denied.is_access_denied());
        assert!(denied.to_string().contains("org/private"));

        let network = HubPortError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(network.status(), None);
    }
}
