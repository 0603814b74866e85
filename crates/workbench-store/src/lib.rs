//! Persistence adapters for QwenWorkbench settings and the hub token.
//!
//! - [`JsonSettingsFile`] implements `SettingsRepository` over a pretty-printed
//!   JSON document.
//! - [`KeyringSecretStore`] and [`PlaintextSecretStore`] implement
//!   `SecretStore`; [`select_secret_store`] picks one at startup.
#![deny(unused_crate_dependencies)]

mod json_settings;
mod secrets;

pub use json_settings::JsonSettingsFile;
pub use secrets::{
    KEYRING_SERVICE, KEYRING_USER, KeyringSecretStore, PlaintextSecretStore, select_secret_store,
};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
