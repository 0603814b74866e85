//! Application services that orchestrate ports.

mod settings_service;

pub use settings_service::{MIN_TOKEN_LEN, SettingsService, TokenSaveOutcome};
