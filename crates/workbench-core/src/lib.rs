//! Core domain types and port definitions for QwenWorkbench.
//!
//! This crate holds everything that does not touch the network, the OS
//! credential store, or HTTP: the model registry and fit checker, settings
//! types and the settings service, the event bus, and the port traits the
//! adapter crates implement.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    FitBreakdown, FitChecker, FitResult, FitStatus, MachineProfile, Model, ModelRegistry,
    RegistryError, ResolvedVariant, Runtime, RuntimeOverhead, Variant,
};
pub use events::{EventBus, FileStatus, Subscription, SubscriptionId, WorkbenchEvent};
pub use ports::{
    CoreError, HubClientPort, HubPortError, HubPortResult, RepoFile, RepositoryError,
    SecretStore, SecretStoreError, SettingsRepository,
};
pub use services::{MIN_TOKEN_LEN, SettingsService, TokenSaveOutcome};
pub use settings::{
    DEFAULT_RESERVE_GB, MAX_RESERVE_GB, MIN_RESERVE_GB, Settings, SettingsError, SettingsPatch,
    TokenStorage, clamp_reserve,
};
pub use utils::bytes_to_gb;
