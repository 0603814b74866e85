//! Port trait implementation for `HfClient`.
//!
//! This module implements the core-owned `HubClientPort` trait for
//! `HfClient`, converting internal errors and types to core ones.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use workbench_core::ports::{HubClientPort, HubPortError, HubPortResult, RepoFile};

use crate::client::HfClient;
use crate::error::HfError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HfError` to core `HubPortError`.
fn map_error(err: HfError, repo_id: &str) -> HubPortError {
    match err {
        HfError::ApiRequestFailed { status, message } => {
            if status == 401 || status == 403 {
                HubPortError::AccessDenied {
                    repo_id: repo_id.to_string(),
                    status,
                }
            } else {
                HubPortError::Http { status, message }
            }
        }
        HfError::InvalidResponse { message } => HubPortError::InvalidResponse { message },
        HfError::Network(e) => match e.status() {
            Some(status) => map_error(
                HfError::ApiRequestFailed {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                repo_id,
            ),
            None => HubPortError::Network {
                message: e.to_string(),
            },
        },
        HfError::InvalidUrl(e) => HubPortError::InvalidResponse {
            message: format!("invalid URL: {e}"),
        },
        HfError::JsonParse(e) => HubPortError::InvalidResponse {
            message: e.to_string(),
        },
        HfError::Io { path, source } => HubPortError::LocalIo {
            path,
            message: source.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> HubClientPort for HfClient<B> {
    async fn list_files(
        &self,
        repo_id: &str,
        token: Option<&str>,
    ) -> HubPortResult<Vec<RepoFile>> {
        let siblings = self
            .list_repo_files(repo_id, token)
            .await
            .map_err(|e| map_error(e, repo_id))?;

        Ok(siblings
            .iter()
            .map(|s| RepoFile::new(s.rfilename.clone(), s.size_bytes()))
            .collect())
    }

    async fn fetch_file(
        &self,
        repo_id: &str,
        path: &str,
        token: Option<&str>,
        local_dir: &Path,
    ) -> HubPortResult<PathBuf> {
        self.download_repo_file(repo_id, path, token, local_dir)
            .await
            .map_err(|e| map_error(e, repo_id))
    }
}
