//! Settings repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::Settings;

/// Persistence for the settings document.
///
/// The implementation handles serialization and first-run initialization.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load settings, writing defaults first if nothing is stored yet.
    async fn load(&self) -> Result<Settings, RepositoryError>;

    /// Replace the stored document.
    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError>;
}
