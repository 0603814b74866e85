//! Repository file listing and file transfer.

use std::path::{Component, Path, PathBuf};

use crate::error::{HfError, HfResult};
use crate::http::HttpBackend;
use crate::models::{HfModelInfo, HfSibling};
use crate::url::{build_download_url, build_model_info_url};

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// List every file of a repository, as reported by the model info
    /// endpoint.
    pub(crate) async fn list_repo_files(
        &self,
        repo_id: &str,
        token: Option<&str>,
    ) -> HfResult<Vec<HfSibling>> {
        let url = build_model_info_url(&self.config, repo_id);
        let info: HfModelInfo = self.backend.get_json(&url, token).await?;
        Ok(info.siblings)
    }

    /// Download one repository file to `local_dir/<path>`.
    pub(crate) async fn download_repo_file(
        &self,
        repo_id: &str,
        path: &str,
        token: Option<&str>,
        local_dir: &Path,
    ) -> HfResult<PathBuf> {
        let dest = local_target(local_dir, path)?;
        let url = build_download_url(&self.config, repo_id, path, None);

        tracing::debug!(
            target: "workbench_hf::download",
            repo_id,
            file = path,
            dest = %dest.display(),
            "Fetching file"
        );
        let written = self.backend.download_to_file(&url, token, &dest).await?;
        tracing::debug!(
            target: "workbench_hf::download",
            repo_id,
            file = path,
            bytes = written,
            "File written"
        );

        Ok(dest)
    }
}

/// Resolve a repository-relative path under `local_dir`.
///
/// Rejects absolute paths and `..` so a listing cannot escape the cache.
fn local_target(local_dir: &Path, path: &str) -> HfResult<PathBuf> {
    let relative = Path::new(path);
    let safe = !path.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if !safe {
        return Err(HfError::InvalidResponse {
            message: format!("refusing to write repository path '{path}'"),
        });
    }
    Ok(local_dir.join(relative))
}
