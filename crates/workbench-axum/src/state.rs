//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped `AxumContext` containing the registry, settings
/// service, download manager and event bus.
pub type AppState = Arc<AxumContext>;
