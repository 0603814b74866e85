use std::path::PathBuf;

use thiserror::Error;
use workbench_core::HubPortError;

/// Errors from download manager operations.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The file filter matched nothing in the repository listing.
    #[error("No files selected for download")]
    NoFilesSelected,

    #[error(transparent)]
    Hub(#[from] HubPortError),

    #[error("Failed to access {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl DownloadError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
