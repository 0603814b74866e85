//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes, without state applied.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Models API
        .route("/models", get(handlers::models::list))
        .route("/models/size", post(handlers::models::size))
        .route("/models/explore", post(handlers::models::explore))
        .route("/models/download", post(handlers::models::download))
        // Settings API
        .route(
            "/settings",
            get(handlers::settings::get).post(handlers::settings::update),
        )
        .route("/settings/token", post(handlers::settings::save_token))
        // System API
        .route("/system/status", get(handlers::system::status))
        // Tasks API
        .route("/tasks/chat", post(handlers::tasks::chat))
        // Events
        .route("/ws/events", get(handlers::events::stream))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the main router with CORS and request tracing.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    create_router_with_state(Arc::new(ctx), cors_config)
}

/// Same as [`create_router`] for callers that keep a handle on the state.
pub fn create_router_with_state(state: AppState, cors_config: &CorsConfig) -> Router {
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes().with_state(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
