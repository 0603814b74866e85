//! Settings DTOs.

use std::path::PathBuf;

use serde::Deserialize;
use workbench_core::SettingsPatch;

/// Body of `POST /settings`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdateRequest {
    #[serde(default)]
    pub model_cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub reserve_gb: Option<f64>,
}

impl From<SettingsUpdateRequest> for SettingsPatch {
    fn from(req: SettingsUpdateRequest) -> Self {
        Self {
            model_cache_dir: req.model_cache_dir,
            reserve_gb: req.reserve_gb,
        }
    }
}

/// Body of `POST /settings/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}
