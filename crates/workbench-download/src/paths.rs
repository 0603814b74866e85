//! Destination path planning for downloads.

use std::path::{Path, PathBuf};

use workbench_core::RepoFile;

use crate::error::DownloadError;

/// Directory name for a repository inside the cache: `org/name` becomes
/// `org__name`.
pub fn repo_dir_name(repo_id: &str) -> String {
    repo_id.replace('/', "__")
}

/// A planned download destination.
#[derive(Debug, Clone)]
pub struct DownloadDestination {
    /// Directory the repository files are written under.
    pub repo_dir: PathBuf,
    /// Files to fetch, in order.
    pub files: Vec<RepoFile>,
}

impl DownloadDestination {
    pub fn plan(cache_dir: &Path, repo_id: &str, files: Vec<RepoFile>) -> Self {
        Self {
            repo_dir: cache_dir.join(repo_dir_name(repo_id)),
            files,
        }
    }

    /// Ensure the repository directory exists.
    pub async fn ensure_dir(&self) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.repo_dir)
            .await
            .map_err(|e| DownloadError::io(&self.repo_dir, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_dir_name() {
        assert_eq!(repo_dir_name("Qwen/Qwen-Image"), "Qwen__Qwen-Image");
        assert_eq!(repo_dir_name("single"), "single");
    }

    #[test]
    fn plan_creates_correct_repo_dir() {
        let plan = DownloadDestination::plan(
            Path::new("/models"),
            "unsloth/Qwen3-Coder-Next-GGUF",
            vec![RepoFile::new("a.gguf", 1)],
        );
        assert_eq!(
            plan.repo_dir,
            PathBuf::from("/models/unsloth__Qwen3-Coder-Next-GGUF")
        );
        assert_eq!(plan.files.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_dir() {
        let temp = tempfile::tempdir().unwrap();
        let plan = DownloadDestination::plan(temp.path(), "org/repo", Vec::new());
        plan.ensure_dir().await.unwrap();
        assert!(temp.path().join("org__repo").is_dir());
    }
}
