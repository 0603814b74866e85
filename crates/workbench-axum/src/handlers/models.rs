//! Model handlers - catalog, sizing, exploration and downloads.

use axum::Json;
use axum::extract::State;
use workbench_core::FitChecker;
use workbench_download::{DownloadOutcome, RepoSizeEstimate};

use crate::disk::disk_snapshot;
use crate::dto::{ExploreResponse, ModelEntry, ModelsResponse, VariantEntry, VariantRequest};
use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// List the catalog with a fit verdict per variant at the current reserve.
pub async fn list(State(state): State<AppState>) -> Result<Json<ModelsResponse>, HttpError> {
    let settings = state.settings.get().await?;
    let checker = FitChecker::new(&state.registry);

    let mut models = Vec::with_capacity(state.registry.all_models().len());
    for model in state.registry.all_models() {
        let variants = model
            .variants
            .iter()
            .map(|variant| -> Result<VariantEntry, HttpError> {
                let fit = checker.check(&model.id, &variant.id, settings.reserve_gb)?;
                Ok(VariantEntry {
                    variant: variant.clone(),
                    fit,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        models.push(ModelEntry::new(model, variants));
    }

    let disk = disk_snapshot(settings.resolved_cache_dir()).await?;
    Ok(Json(ModelsResponse {
        machine_profile: state.registry.machine_profile().clone(),
        models,
        disk,
    }))
}

/// Size a variant on the hub using the stored token.
pub async fn size(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VariantRequest>,
) -> Result<Json<RepoSizeEstimate>, HttpError> {
    let variant = state.registry.get_variant(&req.model_id, &req.variant_id)?;
    let token = state.settings.get_token().await?;

    let estimate = state
        .downloads
        .estimate_repo_size(&variant.repo_id, token.as_deref(), variant.include_file())
        .await?;
    Ok(Json(estimate))
}

/// Probe hub access, check fit and disk space for a variant.
pub async fn explore(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VariantRequest>,
) -> Result<Json<ExploreResponse>, HttpError> {
    let variant = state.registry.get_variant(&req.model_id, &req.variant_id)?;
    let token = resolve_token(&state, &req).await?;

    let probe = state
        .downloads
        .probe_repo(&variant.repo_id, token.as_deref())
        .await;

    let settings = state.settings.get().await?;
    let fit = FitChecker::new(&state.registry).check(
        &req.model_id,
        &req.variant_id,
        settings.reserve_gb,
    )?;
    let disk = disk_snapshot(settings.resolved_cache_dir()).await?;

    Ok(Json(ExploreResponse::assemble(
        req,
        variant.repo_id,
        probe,
        fit,
        disk,
    )))
}

/// Download a variant into the model cache, publishing progress events.
pub async fn download(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VariantRequest>,
) -> Result<Json<DownloadOutcome>, HttpError> {
    let variant = state.registry.get_variant(&req.model_id, &req.variant_id)?;
    let token = resolve_token(&state, &req).await?;

    tracing::info!(
        model_id = %req.model_id,
        variant_id = %req.variant_id,
        repo_id = %variant.repo_id,
        "Starting download"
    );

    let outcome = state
        .downloads
        .download_variant(&variant.repo_id, variant.include_file(), token.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// Request token if given, otherwise the stored one.
async fn resolve_token(
    state: &AppState,
    req: &VariantRequest,
) -> Result<Option<String>, HttpError> {
    match req.token() {
        Some(token) => Ok(Some(token.to_string())),
        None => Ok(state.settings.get_token().await?),
    }
}
