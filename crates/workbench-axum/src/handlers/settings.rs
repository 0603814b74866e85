//! Settings handlers - application configuration and hub token.

use axum::Json;
use axum::extract::State;
use workbench_core::{Settings, SettingsPatch, TokenSaveOutcome};

use crate::dto::{SettingsUpdateRequest, TokenRequest};
use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Get application settings.
pub async fn get(State(state): State<AppState>) -> Result<Json<Settings>, HttpError> {
    Ok(Json(state.settings.get().await?))
}

/// Update application settings.
///
/// The download manager picks up the new cache directory immediately.
pub async fn update(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SettingsUpdateRequest>,
) -> Result<Json<Settings>, HttpError> {
    let patch = SettingsPatch::from(req);
    let updated = state.settings.patch(&patch).await?;
    state
        .downloads
        .set_cache_dir(updated.resolved_cache_dir())
        .await?;
    Ok(Json(updated))
}

/// Store the hub token.
pub async fn save_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TokenRequest>,
) -> Result<Json<TokenSaveOutcome>, HttpError> {
    Ok(Json(state.settings.save_token(&req.token).await?))
}
