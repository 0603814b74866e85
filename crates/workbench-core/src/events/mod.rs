//! Push events delivered to connected UI clients.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "download_progress", "repo_id": "org/repo", "file": "model.gguf",
//!   "status": "starting", "index": 1, "total_files": 2, "file_bytes": 1024 }
//! { "type": "download_complete", "repo_id": "org/repo", "total_bytes": 2048, "total_gb": 0.0 }
//! ```

mod bus;

use serde::{Deserialize, Serialize};

pub use bus::{EventBus, Subscription, SubscriptionId};

/// Phase of a single file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Starting,
    Completed,
}

/// Events published while downloading a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkbenchEvent {
    /// One file of a download is starting or has completed.
    DownloadProgress {
        repo_id: String,
        file: String,
        status: FileStatus,
        /// 1-based position of the file in the download.
        index: usize,
        total_files: usize,
        /// Size from the initial listing, in both phases. Not reconciled
        /// with the bytes actually written.
        file_bytes: u64,
    },

    /// Every file of a download has been written.
    DownloadComplete {
        repo_id: String,
        /// Sum of the on-disk sizes observed after each transfer.
        total_bytes: u64,
        total_gb: f64,
    },
}

impl WorkbenchEvent {
    /// Create a download progress event.
    pub fn download_progress(
        repo_id: impl Into<String>,
        file: impl Into<String>,
        status: FileStatus,
        index: usize,
        total_files: usize,
        file_bytes: u64,
    ) -> Self {
        Self::DownloadProgress {
            repo_id: repo_id.into(),
            file: file.into(),
            status,
            index,
            total_files,
            file_bytes,
        }
    }

    /// Create a download complete event.
    pub fn download_complete(repo_id: impl Into<String>, total_bytes: u64) -> Self {
        Self::DownloadComplete {
            repo_id: repo_id.into(),
            total_bytes,
            total_gb: crate::utils::bytes_to_gb(total_bytes),
        }
    }

    /// Repository the event refers to.
    pub fn repo_id(&self) -> &str {
        match self {
            Self::DownloadProgress { repo_id, .. } | Self::DownloadComplete { repo_id, .. } => {
                repo_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_wire_format() {
        let event = WorkbenchEvent::download_progress(
            "org/repo",
            "model.gguf",
            FileStatus::Starting,
            1,
            2,
            1024,
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "download_progress",
                "repo_id": "org/repo",
                "file": "model.gguf",
                "status": "starting",
                "index": 1,
                "total_files": 2,
                "file_bytes": 1024
            })
        );
    }

    #[test]
    fn test_complete_wire_format() {
        let event = WorkbenchEvent::download_complete("org/repo", 3 * 1024 * 1024 * 1024);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "download_complete");
        assert_eq!(value["total_gb"], 3.0);
        assert_eq!(event.repo_id(), "org/repo");
    }
}
