//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod hub;
pub mod secret_store;
pub mod settings_repository;

use thiserror::Error;

pub use hub::{HubClientPort, HubPortError, HubPortResult, RepoFile};
pub use secret_store::{SecretStore, SecretStoreError};
pub use settings_repository::SettingsRepository;

use crate::domain::RegistryError;

/// Storage failures, independent of the backing medium.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown model or variant.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Settings persistence failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),
}
