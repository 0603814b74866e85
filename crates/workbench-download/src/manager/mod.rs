//! Download manager implementation.
//!
//! Mediates every interaction with the hub: listing files and sizes,
//! probing accessibility, and downloading a repository one file at a time
//! while publishing progress on the event bus.
//!
//! # Ordering
//!
//! Files are transferred strictly in listing order. Each file's `starting`
//! event is published only after the previous file's `completed` event, and
//! `download_complete` is published only when every file has been written.
//! The first failure aborts the download; no completion event follows it.

mod probe;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use workbench_core::{EventBus, FileStatus, HubClientPort, RepoFile, WorkbenchEvent};

use crate::error::DownloadError;
use crate::paths::DownloadDestination;
use crate::types::{DownloadOutcome, RepoProbe, RepoSizeEstimate};

pub use probe::AUTH_REQUIRED_MESSAGE;

/// Sizes, probes and downloads hub repositories into a local cache.
pub struct DownloadManager {
    hub: Arc<dyn HubClientPort>,
    events: Arc<EventBus>,
    cache_dir: RwLock<PathBuf>,
}

impl DownloadManager {
    /// Create a manager rooted at `cache_dir`, creating the directory.
    pub fn new(
        hub: Arc<dyn HubClientPort>,
        events: Arc<EventBus>,
        cache_dir: PathBuf,
    ) -> Result<Self, DownloadError> {
        std::fs::create_dir_all(&cache_dir).map_err(|e| DownloadError::io(&cache_dir, &e))?;
        Ok(Self {
            hub,
            events,
            cache_dir: RwLock::new(cache_dir),
        })
    }

    /// Current cache root.
    pub async fn cache_dir(&self) -> PathBuf {
        self.cache_dir.read().await.clone()
    }

    /// Replace the cache root, creating the directory.
    ///
    /// Downloads already in flight keep writing to the root they started
    /// with.
    pub async fn set_cache_dir(&self, dir: PathBuf) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DownloadError::io(&dir, &e))?;
        tracing::info!(
            target: "workbench_download",
            cache_dir = %dir.display(),
            "Model cache directory changed"
        );
        *self.cache_dir.write().await = dir;
        Ok(())
    }

    /// List every file of a repository with its size.
    pub async fn repo_files_with_sizes(
        &self,
        repo_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<RepoFile>, DownloadError> {
        Ok(self.hub.list_files(repo_id, token).await?)
    }

    /// Size a repository, or one file of it when `include_file` is set.
    ///
    /// A filter that matches nothing yields zero totals.
    pub async fn estimate_repo_size(
        &self,
        repo_id: &str,
        token: Option<&str>,
        include_file: Option<&str>,
    ) -> Result<RepoSizeEstimate, DownloadError> {
        let files = self.repo_files_with_sizes(repo_id, token).await?;
        Ok(RepoSizeEstimate::from_files(
            repo_id,
            select_files(files, include_file),
        ))
    }

    /// Check whether a repository is reachable with `token`.
    ///
    /// Never fails: hub errors are folded into the returned probe.
    pub async fn probe_repo(&self, repo_id: &str, token: Option<&str>) -> RepoProbe {
        match self.estimate_repo_size(repo_id, token, None).await {
            Ok(estimate) => RepoProbe::available(estimate),
            Err(DownloadError::Hub(e)) => {
                tracing::debug!(
                    target: "workbench_download",
                    repo_id,
                    error = %e,
                    "Repository probe failed"
                );
                probe::classify(&e)
            }
            Err(e) => RepoProbe::unavailable(false, format!("HF error: {e}")),
        }
    }

    /// Download a repository (or one file of it) into the cache.
    ///
    /// Files are fetched sequentially into `<cache_dir>/<org>__<name>`.
    pub async fn download_variant(
        &self,
        repo_id: &str,
        include_file: Option<&str>,
        token: Option<&str>,
    ) -> Result<DownloadOutcome, DownloadError> {
        let files = select_files(self.repo_files_with_sizes(repo_id, token).await?, include_file);
        if files.is_empty() {
            return Err(DownloadError::NoFilesSelected);
        }

        let cache_dir = self.cache_dir().await;
        let destination = DownloadDestination::plan(&cache_dir, repo_id, files);
        destination.ensure_dir().await?;

        let total_files = destination.files.len();
        tracing::info!(
            target: "workbench_download",
            repo_id,
            total_files,
            dest = %destination.repo_dir.display(),
            "Starting download"
        );

        let mut total_bytes: u64 = 0;
        let mut written = Vec::with_capacity(total_files);
        for (i, file) in destination.files.iter().enumerate() {
            let index = i + 1;
            self.events.publish(WorkbenchEvent::download_progress(
                repo_id,
                &file.path,
                FileStatus::Starting,
                index,
                total_files,
                file.size,
            ));

            let local = self
                .hub
                .fetch_file(repo_id, &file.path, token, &destination.repo_dir)
                .await
                .inspect_err(|e| {
                    tracing::warn!(
                        target: "workbench_download",
                        repo_id,
                        file = %file.path,
                        error = %e,
                        "Download aborted"
                    );
                })?;
            let size = observed_size(&local).await?;
            total_bytes += size;
            written.push(RepoFile::new(file.path.clone(), size));

            self.events.publish(WorkbenchEvent::download_progress(
                repo_id,
                &file.path,
                FileStatus::Completed,
                index,
                total_files,
                file.size,
            ));
        }

        self.events
            .publish(WorkbenchEvent::download_complete(repo_id, total_bytes));
        tracing::info!(
            target: "workbench_download",
            repo_id,
            total_bytes,
            "Download complete"
        );

        Ok(DownloadOutcome {
            repo_id: repo_id.to_string(),
            files: written,
            total_bytes,
        })
    }
}

/// Keep only the exact `include_file` match when a filter is given.
fn select_files(files: Vec<RepoFile>, include_file: Option<&str>) -> Vec<RepoFile> {
    match include_file {
        Some(wanted) => files.into_iter().filter(|f| f.path == wanted).collect(),
        None => files,
    }
}

async fn observed_size(path: &Path) -> Result<u64, DownloadError> {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.len())
        .map_err(|e| DownloadError::io(path, &e))
}
