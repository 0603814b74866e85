//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! Request bodies are validated here, before they reach the services.
//! Responses that are plain domain values (settings, probe, size estimate)
//! are returned as-is and have no DTO.

pub mod models;
pub mod settings;
pub mod system;
pub mod tasks;

pub use models::{
    ExploreDisk, ExploreResponse, ModelEntry, ModelsResponse, VariantEntry, VariantRequest,
};
pub use settings::{SettingsUpdateRequest, TokenRequest};
pub use system::SystemStatus;
pub use tasks::{ChatRequest, ChatResponse};
