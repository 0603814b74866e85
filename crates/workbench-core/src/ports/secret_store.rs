//! Secure credential storage capability.
//!
//! Two implementations exist in `workbench-store`: one backed by the OS
//! credential store and one that is never available, which makes callers
//! fall back to plain-text storage.

use thiserror::Error;

/// Secret store failures.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// No secure backend is available on this system.
    #[error("secure credential storage is unavailable")]
    Unavailable,

    /// The backend exists but the operation failed.
    #[error("credential store error: {0}")]
    Backend(String),
}

/// Capability for storing the hub token outside the settings file.
pub trait SecretStore: Send + Sync {
    /// Short name of the backend, for logs.
    fn backend_name(&self) -> &'static str;

    /// Store the token, replacing any previous one.
    fn set_token(&self, token: &str) -> Result<(), SecretStoreError>;

    /// Read the token, `Ok(None)` when nothing is stored.
    fn get_token(&self) -> Result<Option<String>, SecretStoreError>;
}
