//! Hub token storage backends.

use std::sync::Arc;

use workbench_core::ports::{SecretStore, SecretStoreError};

/// Credential store service name.
pub const KEYRING_SERVICE: &str = "qwenworkbench";

/// Credential store account name.
pub const KEYRING_USER: &str = "hf_token";

/// Token storage in the OS credential store.
#[derive(Debug, Clone, Default)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
    pub const fn new() -> Self {
        Self
    }

    fn entry() -> Result<keyring::Entry, SecretStoreError> {
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(map_keyring_error)
    }
}

fn map_keyring_error(err: keyring::Error) -> SecretStoreError {
    match err {
        keyring::Error::NoStorageAccess(_) => SecretStoreError::Unavailable,
        other => SecretStoreError::Backend(other.to_string()),
    }
}

impl SecretStore for KeyringSecretStore {
    fn backend_name(&self) -> &'static str {
        "keyring"
    }

    fn set_token(&self, token: &str) -> Result<(), SecretStoreError> {
        Self::entry()?.set_password(token).map_err(map_keyring_error)
    }

    fn get_token(&self) -> Result<Option<String>, SecretStoreError> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}

/// Placeholder used when secure storage is disabled.
///
/// Always reports itself unavailable, so tokens end up in the settings file.
#[derive(Debug, Clone, Default)]
pub struct PlaintextSecretStore;

impl SecretStore for PlaintextSecretStore {
    fn backend_name(&self) -> &'static str {
        "plaintext"
    }

    fn set_token(&self, _token: &str) -> Result<(), SecretStoreError> {
        Err(SecretStoreError::Unavailable)
    }

    fn get_token(&self) -> Result<Option<String>, SecretStoreError> {
        Ok(None)
    }
}

/// Pick the token backend for this process.
pub fn select_secret_store(use_keyring: bool) -> Arc<dyn SecretStore> {
    if use_keyring {
        Arc::new(KeyringSecretStore::new())
    } else {
        tracing::warn!("Secure token storage disabled; tokens will be stored in the settings file");
        Arc::new(PlaintextSecretStore)
    }
}
