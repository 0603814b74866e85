//! Model catalog DTOs.

use serde::{Deserialize, Serialize};
use workbench_core::{FitResult, MachineProfile, Model, Runtime, Variant};
use workbench_download::RepoProbe;

use crate::disk::DiskSnapshot;

/// Body of `/models/size`, `/models/explore` and `/models/download`.
///
/// `token` is ignored by `/models/size`, which always uses the stored token.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRequest {
    pub model_id: String,
    pub variant_id: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl VariantRequest {
    /// Request token when non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A registry variant with its fit verdict.
#[derive(Debug, Clone, Serialize)]
pub struct VariantEntry {
    #[serde(flatten)]
    pub variant: Variant,
    pub fit: FitResult,
}

/// A registry model whose variants carry fit verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub runtime: Runtime,
    pub repo_id: String,
    pub variants: Vec<VariantEntry>,
}

impl ModelEntry {
    pub fn new(model: &Model, variants: Vec<VariantEntry>) -> Self {
        Self {
            id: model.id.clone(),
            runtime: model.runtime,
            repo_id: model.repo_id.clone(),
            variants,
        }
    }
}

/// Response of `GET /models`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub machine_profile: MachineProfile,
    pub models: Vec<ModelEntry>,
    pub disk: DiskSnapshot,
}

/// Disk section of an explore response.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreDisk {
    #[serde(flatten)]
    pub snapshot: DiskSnapshot,
    pub enough_for_download: bool,
}

/// Response of `POST /models/explore`.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreResponse {
    pub model_id: String,
    pub variant_id: String,
    pub repo_id: String,
    pub probe: RepoProbe,
    pub fit: FitResult,
    pub disk: ExploreDisk,
    pub ready_to_download: bool,
    pub ready_to_load: bool,
}

impl ExploreResponse {
    /// Combine probe, fit and disk into readiness flags.
    pub fn assemble(
        request: VariantRequest,
        repo_id: String,
        probe: RepoProbe,
        fit: FitResult,
        snapshot: DiskSnapshot,
    ) -> Self {
        let enough_for_download = probe.available && snapshot.free_bytes >= probe.total_bytes;
        let ready_to_load = fit.fits();
        Self {
            model_id: request.model_id,
            variant_id: request.variant_id,
            repo_id,
            ready_to_download: probe.available && enough_for_download,
            probe,
            fit,
            disk: ExploreDisk {
                snapshot,
                enough_for_download,
            },
            ready_to_load,
        }
    }
}
