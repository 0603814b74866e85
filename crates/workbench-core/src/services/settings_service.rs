//! Settings service - orchestrates settings and token operations.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::ports::{CoreError, SecretStore, SecretStoreError, SettingsRepository};
use crate::settings::{Settings, SettingsError, SettingsPatch, TokenStorage};

/// Shortest hub token accepted.
pub const MIN_TOKEN_LEN: usize = 10;

/// Result of saving a hub token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSaveOutcome {
    pub ok: bool,
    pub storage: TokenStorage,
    pub settings: Settings,
}

/// Service for settings operations.
///
/// Writes are read-modify-write of the whole document, serialized through
/// a lock so concurrent patches do not interleave.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    secrets: Arc<dyn SecretStore>,
    write_lock: Mutex<()>,
}

impl SettingsService {
    /// Create a new settings service.
    pub fn new(repo: Arc<dyn SettingsRepository>, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            repo,
            secrets,
            write_lock: Mutex::new(()),
        }
    }

    /// Get current settings.
    pub async fn get(&self) -> Result<Settings, CoreError> {
        Ok(self.repo.load().await?)
    }

    /// Merge the non-empty fields of `patch` and persist.
    pub async fn patch(&self, patch: &SettingsPatch) -> Result<Settings, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut current = self.repo.load().await?;
        current.apply(patch)?;
        self.repo.save(&current).await?;
        tracing::debug!(
            reserve_gb = current.reserve_gb,
            cache_dir = %current.model_cache_dir.display(),
            "Settings updated"
        );
        Ok(current)
    }

    /// Store the hub token, preferring the secure store.
    ///
    /// Any secure-store failure falls back to the settings file and marks
    /// the storage as `config_warning` so the UI can warn the user.
    pub async fn save_token(&self, token: &str) -> Result<TokenSaveOutcome, CoreError> {
        if token.chars().count() < MIN_TOKEN_LEN {
            return Err(SettingsError::TokenTooShort { min: MIN_TOKEN_LEN }.into());
        }

        let owned = token.to_string();
        let stored = self
            .with_secrets(move |secrets| secrets.set_token(&owned))
            .await;

        let _guard = self.write_lock.lock().await;
        let mut current = self.repo.load().await?;

        match stored {
            Ok(()) => {
                current.token_storage = TokenStorage::Keyring;
                current.hf_token = None;
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.secrets.backend_name(),
                    error = %e,
                    "Secure token storage failed; storing token in settings file"
                );
                current.token_storage = TokenStorage::ConfigWarning;
                current.hf_token = Some(token.to_string());
            }
        }

        self.repo.save(&current).await?;
        Ok(TokenSaveOutcome {
            ok: true,
            storage: current.token_storage,
            settings: current,
        })
    }

    /// Resolve the stored hub token: secure store first, then the file.
    ///
    /// When the settings claim the secure store holds the token but it is
    /// gone, the storage marker is reset to `unset`.
    pub async fn get_token(&self) -> Result<Option<String>, CoreError> {
        match self.with_secrets(|secrets| secrets.get_token()).await {
            Ok(Some(token)) if !token.is_empty() => return Ok(Some(token)),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    backend = self.secrets.backend_name(),
                    error = %e,
                    "Secure token lookup failed"
                );
                return Ok(self.repo.load().await?.hf_token);
            }
        }

        let current = self.repo.load().await?;
        if current.token_storage == TokenStorage::Keyring {
            return self.forget_lost_token().await;
        }
        Ok(current.hf_token)
    }

    async fn forget_lost_token(&self) -> Result<Option<String>, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut current = self.repo.load().await?;
        if current.token_storage == TokenStorage::Keyring {
            tracing::warn!(
                backend = self.secrets.backend_name(),
                "Hub token missing from secure store; marking it unset"
            );
            current.token_storage = TokenStorage::Unset;
            self.repo.save(&current).await?;
        }
        Ok(current.hf_token)
    }

    /// Run a secret store call off the async runtime; OS stores block.
    async fn with_secrets<T, F>(&self, op: F) -> Result<T, SecretStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SecretStore) -> Result<T, SecretStoreError> + Send + 'static,
    {
        let secrets = Arc::clone(&self.secrets);
        tokio::task::spawn_blocking(move || op(secrets.as_ref()))
            .await
            .map_err(|e| SecretStoreError::Backend(format!("secret store task failed: {e}")))?
    }
}
