//! Download manager for QwenWorkbench.
//!
//! - `manager` - listing, sizing, probing and sequential downloads
//! - `paths` - on-disk layout of downloaded repositories
//! - `types` - result shapes returned to the API layer
#![deny(unused_crate_dependencies)]

mod error;
mod manager;
mod paths;
mod types;

pub use error::DownloadError;
pub use manager::{AUTH_REQUIRED_MESSAGE, DownloadManager};
pub use paths::{DownloadDestination, repo_dir_name};
pub use types::{DownloadOutcome, RepoProbe, RepoSizeEstimate};

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
