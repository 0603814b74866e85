//! Result shapes returned by the download manager.

use serde::{Deserialize, Serialize};
use workbench_core::{RepoFile, bytes_to_gb};

/// Size of a repository, optionally narrowed to a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSizeEstimate {
    pub repo_id: String,
    pub total_bytes: u64,
    pub total_gb: f64,
    pub files: Vec<RepoFile>,
}

impl RepoSizeEstimate {
    pub fn from_files(repo_id: impl Into<String>, files: Vec<RepoFile>) -> Self {
        let total_bytes = files.iter().map(|f| f.size).sum();
        Self {
            repo_id: repo_id.into(),
            total_bytes,
            total_gb: bytes_to_gb(total_bytes),
            files,
        }
    }
}

/// Non-failing accessibility check of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoProbe {
    pub available: bool,
    pub auth_required: bool,
    pub error: Option<String>,
    pub total_bytes: u64,
    pub total_gb: f64,
    pub files: Vec<RepoFile>,
}

impl RepoProbe {
    pub(crate) fn available(estimate: RepoSizeEstimate) -> Self {
        Self {
            available: true,
            auth_required: false,
            error: None,
            total_bytes: estimate.total_bytes,
            total_gb: estimate.total_gb,
            files: estimate.files,
        }
    }

    pub(crate) fn unavailable(auth_required: bool, error: String) -> Self {
        Self {
            available: false,
            auth_required,
            error: Some(error),
            total_bytes: 0,
            total_gb: 0.0,
            files: Vec::new(),
        }
    }
}

/// Result of a completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub repo_id: String,
    /// Files written, with the size observed on disk.
    pub files: Vec<RepoFile>,
    /// Sum of the on-disk sizes after each transfer.
    pub total_bytes: u64,
}
