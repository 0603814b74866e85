//! System status handler.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;

use crate::dto::SystemStatus;
use crate::error::HttpError;
use crate::state::AppState;

pub async fn status(State(state): State<AppState>) -> Result<Json<SystemStatus>, HttpError> {
    let settings = state.settings.get().await?;
    let profile = state.registry.machine_profile();
    Ok(Json(SystemStatus {
        machine: profile.name.clone(),
        unified_memory_gb: profile.unified_memory_gb,
        reserve_gb: settings.reserve_gb,
        workers: BTreeMap::new(),
    }))
}
