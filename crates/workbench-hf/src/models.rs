//! Internal API response types for `HuggingFace` Hub.
//!
//! These types are internal to `workbench-hf` and are not exposed to
//! consumers, who see [`workbench_core::RepoFile`] instead.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the `HuggingFace` client.
#[derive(Debug, Clone)]
pub struct HfConfig {
    /// Hub root URL
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

// ============================================================================
// Model Info
// ============================================================================

/// Subset of `GET /api/models/{repo}?blobs=true` that we read.
#[derive(Debug, Clone, Deserialize)]
pub struct HfModelInfo {
    #[serde(default)]
    pub siblings: Vec<HfSibling>,
}

/// One file entry of a model info response.
#[derive(Debug, Clone, Deserialize)]
pub struct HfSibling {
    pub rfilename: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub lfs: Option<HfLfsInfo>,
}

/// LFS metadata; carries the real size for pointer files.
#[derive(Debug, Clone, Deserialize)]
pub struct HfLfsInfo {
    #[serde(default)]
    pub size: Option<u64>,
}

impl HfSibling {
    /// Size in bytes, 0 when the hub did not report one.
    pub fn size_bytes(&self) -> u64 {
        self.size
            .or_else(|| self.lfs.as_ref().and_then(|lfs| lfs.size))
            .unwrap_or(0)
    }
}
