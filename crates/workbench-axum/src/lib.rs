//! Axum web server adapter for QwenWorkbench.
//!
//! Exposes the model registry, fit checker, download manager and settings
//! over HTTP, and streams download events over a WebSocket. The
//! [`bootstrap`] module is the composition root that wires the adapters
//! together.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_tungstenite as _;
#[cfg(test)]
use tower as _;

// Used by main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod chat_log;
pub mod cli;
pub mod disk;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use cli::Cli;
pub use error::HttpError;
pub use routes::{create_router, create_router_with_state};
pub use state::AppState;
