//! JSON file implementation of the settings repository.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use workbench_core::ports::{RepositoryError, SettingsRepository};
use workbench_core::{Settings, clamp_reserve};

/// Settings persisted as a single JSON document.
///
/// The file is created with defaults on first load. Saves go through a
/// sibling temp file and a rename so a crash never leaves half a document.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
    default_cache_dir: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>, default_cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_cache_dir: default_cache_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, settings: &Settings) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create", parent, &e))?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| storage_error("write", &tmp, &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| storage_error("replace", &self.path, &e))
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> RepositoryError {
    RepositoryError::Storage(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl SettingsRepository for JsonSettingsFile {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let defaults = Settings::with_defaults(&self.default_cache_dir);
                self.write(&defaults).await?;
                tracing::info!(path = %self.path.display(), "Created default settings file");
                return Ok(defaults);
            }
            Err(e) => return Err(storage_error("read", &self.path, &e)),
        };

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        // Hand-edited files may carry anything.
        settings.reserve_gb = clamp_reserve(settings.reserve_gb);
        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        self.write(settings).await
    }
}
