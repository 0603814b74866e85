//! Free-space snapshot of the filesystem holding the model cache.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sysinfo::Disks;
use workbench_core::bytes_to_gb;

use crate::error::HttpError;

/// Free and total space of the filesystem holding `cache_dir`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskSnapshot {
    pub cache_dir: PathBuf,
    pub free_bytes: u64,
    pub free_gb: f64,
    pub total_bytes: u64,
    pub total_gb: f64,
}

impl DiskSnapshot {
    fn new(cache_dir: PathBuf, free_bytes: u64, total_bytes: u64) -> Self {
        Self {
            cache_dir,
            free_bytes,
            free_gb: bytes_to_gb(free_bytes),
            total_bytes,
            total_gb: bytes_to_gb(total_bytes),
        }
    }
}

/// Create `cache_dir` if missing and measure its filesystem.
pub async fn disk_snapshot(cache_dir: PathBuf) -> Result<DiskSnapshot, HttpError> {
    tokio::fs::create_dir_all(&cache_dir).await.map_err(|e| {
        HttpError::Internal(format!(
            "Failed to create cache directory {}: {e}",
            cache_dir.display()
        ))
    })?;

    tokio::task::spawn_blocking(move || measure(cache_dir))
        .await
        .map_err(|e| HttpError::Internal(format!("Disk snapshot task failed: {e}")))?
}

fn measure(cache_dir: PathBuf) -> Result<DiskSnapshot, HttpError> {
    let resolved = std::fs::canonicalize(&cache_dir).unwrap_or_else(|_| cache_dir.clone());
    let disks = Disks::new_with_refreshed_list();
    let mounts = disks
        .list()
        .iter()
        .map(|d| (d.mount_point(), d.available_space(), d.total_space()));

    let found = containing_mount(&resolved, mounts);
    snapshot_from(cache_dir, found)
}

/// A cache directory outside every known mount has no measurable free space.
fn snapshot_from(
    cache_dir: PathBuf,
    found: Option<(u64, u64)>,
) -> Result<DiskSnapshot, HttpError> {
    let (free, total) = found.ok_or_else(|| {
        HttpError::Internal(format!(
            "No mounted filesystem contains the cache directory {}",
            cache_dir.display()
        ))
    })?;
    Ok(DiskSnapshot::new(cache_dir, free, total))
}

/// Pick the mount with the longest prefix of `path`.
fn containing_mount<'a>(
    path: &Path,
    mounts: impl Iterator<Item = (&'a Path, u64, u64)>,
) -> Option<(u64, u64)> {
    mounts
        .filter(|(mount, _, _)| path.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.components().count())
        .map(|(_, free, total)| (free, total))
}
