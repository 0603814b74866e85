//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies.
//! Persistence lives behind [`crate::ports::SettingsRepository`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default memory reserve withheld from the fit budget.
pub const DEFAULT_RESERVE_GB: f64 = 10.0;

/// Lowest accepted memory reserve.
pub const MIN_RESERVE_GB: f64 = 2.0;

/// Highest accepted memory reserve.
pub const MAX_RESERVE_GB: f64 = 20.0;

/// Where the hub token currently lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStorage {
    /// No token has been saved.
    #[default]
    Unset,
    /// Token is held by the OS credential store.
    Keyring,
    /// Token is stored in plain text in the settings file.
    ConfigWarning,
}

/// User configuration persisted as a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory for downloaded artifacts.
    pub model_cache_dir: PathBuf,

    /// Memory withheld from the fit budget, in GB.
    #[serde(default = "default_reserve")]
    pub reserve_gb: f64,

    #[serde(default)]
    pub token_storage: TokenStorage,

    /// Plain-text token, only present when secure storage was unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_token: Option<String>,
}

const fn default_reserve() -> f64 {
    DEFAULT_RESERVE_GB
}

impl Settings {
    /// First-run settings for the given cache directory.
    pub fn with_defaults(model_cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_cache_dir: model_cache_dir.into(),
            reserve_gb: DEFAULT_RESERVE_GB,
            token_storage: TokenStorage::Unset,
            hf_token: None,
        }
    }

    /// Cache directory with a leading `~` expanded.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        crate::paths::expand_home(&self.model_cache_dir)
    }

    /// Merge a patch, only touching fields that are `Some`.
    ///
    /// `reserve_gb` is clamped into `[MIN_RESERVE_GB, MAX_RESERVE_GB]`.
    pub fn apply(&mut self, patch: &SettingsPatch) -> Result<(), SettingsError> {
        validate_patch(patch)?;
        if let Some(ref dir) = patch.model_cache_dir {
            self.model_cache_dir.clone_from(dir);
        }
        if let Some(reserve) = patch.reserve_gb {
            self.reserve_gb = clamp_reserve(reserve);
        }
        Ok(())
    }
}

/// Partial settings update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub model_cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub reserve_gb: Option<f64>,
}

impl SettingsPatch {
    pub const fn is_empty(&self) -> bool {
        self.model_cache_dir.is_none() && self.reserve_gb.is_none()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("reserve_gb must be a finite number, got {0}")]
    InvalidReserve(f64),

    #[error("model_cache_dir cannot be empty")]
    EmptyCacheDir,

    #[error("token must be at least {min} characters")]
    TokenTooShort { min: usize },
}

/// Clamp a reserve into the accepted range.
pub fn clamp_reserve(reserve_gb: f64) -> f64 {
    reserve_gb.clamp(MIN_RESERVE_GB, MAX_RESERVE_GB)
}

fn validate_patch(patch: &SettingsPatch) -> Result<(), SettingsError> {
    if let Some(reserve) = patch.reserve_gb {
        if !reserve.is_finite() {
            return Err(SettingsError::InvalidReserve(reserve));
        }
    }
    if patch
        .model_cache_dir
        .as_deref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(SettingsError::EmptyCacheDir);
    }
    Ok(())
}
