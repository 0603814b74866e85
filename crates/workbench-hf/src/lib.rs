//! `HuggingFace` Hub adapter for QwenWorkbench.
//!
//! Implements [`workbench_core::HubClientPort`] on top of reqwest: repository
//! file listings come from the model info endpoint and files are streamed
//! from the `resolve` endpoint into the local cache.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultHfClient is meant to be used
// through the HubClientPort trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultHfClient;

// Configuration
pub use config::{DEFAULT_HUB_URL, HfClientConfig};

// Construction errors
pub use error::HfError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
