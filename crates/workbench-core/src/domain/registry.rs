//! Static model catalog and machine profile.
//!
//! The registry is loaded once at startup from a JSON document and never
//! mutated afterwards. Lookups are linear; the catalog holds a handful of
//! entries.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No model with the given id exists.
    #[error("Unknown model_id: {0}")]
    ModelNotFound(String),

    /// The model exists but has no variant with the given id.
    #[error("Unknown variant_id '{variant_id}' for model '{model_id}'")]
    VariantNotFound {
        /// Parent model id
        model_id: String,
        /// Requested variant id
        variant_id: String,
    },

    /// The registry document could not be read.
    #[error("Failed to read registry {path}: {reason}")]
    Read {
        /// Path of the registry document
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The registry document is not valid JSON for the expected schema.
    #[error("Failed to parse registry: {0}")]
    Parse(#[from] serde_json::Error),

    /// The registry document parsed but violates a structural rule.
    #[error("Invalid registry: {0}")]
    Invalid(String),
}

/// Inference engine family a model is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    #[serde(rename = "llama.cpp")]
    LlamaCpp,
    #[serde(rename = "diffusers")]
    Diffusers,
    #[serde(rename = "other", other)]
    Other,
}

impl Runtime {
    /// Wire tag for this runtime.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LlamaCpp => "llama.cpp",
            Self::Diffusers => "diffusers",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target machine the fit budget is computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    pub name: String,
    pub unified_memory_gb: f64,
    pub default_reserve_gb: f64,
}

/// A quantization or packaging of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub approx_size_gb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_id_override: Option<String>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub runtime: Runtime,
    pub repo_id: String,
    pub variants: Vec<Variant>,
}

impl Model {
    /// Effective repository for a variant of this model.
    fn repo_for<'a>(&'a self, variant: &'a Variant) -> &'a str {
        variant
            .repo_id_override
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.repo_id)
    }
}

/// A variant joined with the parent data needed to act on it.
///
/// Computed per lookup, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedVariant {
    pub id: String,
    pub approx_size_gb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id_override: Option<String>,
    /// Override when set, otherwise the parent model's repository.
    pub repo_id: String,
    pub runtime: Runtime,
}

impl ResolvedVariant {
    /// Single-file filter for hub operations (`None` means the whole repo).
    pub fn include_file(&self) -> Option<&str> {
        self.filename.as_deref().filter(|f| !f.is_empty())
    }
}

/// On-disk shape of the registry document.
#[derive(Debug, Clone, Deserialize)]
struct RegistryDocument {
    machine_profile: MachineProfile,
    models: Vec<Model>,
}

/// Immutable in-memory catalog.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    machine_profile: MachineProfile,
    models: Vec<Model>,
}

impl ModelRegistry {
    /// Load the registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| RegistryError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let registry = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            models = registry.models.len(),
            "Loaded model registry"
        );
        Ok(registry)
    }

    /// Parse and validate a registry document.
    pub fn from_json(raw: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDocument = serde_json::from_str(raw)?;
        Self::validate(&doc.models)?;
        Ok(Self {
            machine_profile: doc.machine_profile,
            models: doc.models,
        })
    }

    fn validate(models: &[Model]) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for model in models {
            if !seen.insert(model.id.as_str()) {
                return Err(RegistryError::Invalid(format!(
                    "duplicate model id '{}'",
                    model.id
                )));
            }
            for variant in &model.variants {
                if model.repo_for(variant).is_empty() {
                    return Err(RegistryError::Invalid(format!(
                        "variant '{}' of model '{}' has no repo_id",
                        variant.id, model.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub const fn machine_profile(&self) -> &MachineProfile {
        &self.machine_profile
    }

    /// All models in document order.
    pub fn all_models(&self) -> &[Model] {
        &self.models
    }

    pub fn get_model(&self, model_id: &str) -> Result<&Model, RegistryError> {
        self.models
            .iter()
            .find(|m| m.id == model_id)
            .ok_or_else(|| RegistryError::ModelNotFound(model_id.to_string()))
    }

    /// Look up a variant and resolve its effective repository and runtime.
    pub fn get_variant(
        &self,
        model_id: &str,
        variant_id: &str,
    ) -> Result<ResolvedVariant, RegistryError> {
        let model = self.get_model(model_id)?;
        let variant = model
            .variants
            .iter()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| RegistryError::VariantNotFound {
                model_id: model_id.to_string(),
                variant_id: variant_id.to_string(),
            })?;

        Ok(ResolvedVariant {
            id: variant.id.clone(),
            approx_size_gb: variant.approx_size_gb,
            filename: variant.filename.clone(),
            repo_id_override: variant.repo_id_override.clone(),
            repo_id: model.repo_for(variant).to_string(),
            runtime: model.runtime,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "machine_profile": {"name": "Test Mac", "unified_memory_gb": 48, "default_reserve_gb": 10},
        "models": [
            {
                "id": "chat.qwen3-next-80b-a3b",
                "runtime": "llama.cpp",
                "repo_id": "unsloth/Qwen3-Next-80B-A3B-Instruct-GGUF",
                "variants": [
                    {"id": "Q3_K_L", "approx_size_gb": 41.4, "filename": "model-Q3_K_L.gguf"},
                    {"id": "Q3_K_M", "approx_size_gb": 38.3, "filename": "model-Q3_K_M.gguf"},
                    {"id": "Q2_K", "approx_size_gb": 28.9, "filename": "model-Q2_K.gguf"}
                ]
            },
            {
                "id": "image.qwen-image",
                "runtime": "diffusers",
                "repo_id": "Qwen/Qwen-Image",
                "variants": [
                    {"id": "bf16", "approx_size_gb": 57.7},
                    {"id": "fp8", "approx_size_gb": 20.4, "repo_id_override": "Comfy-Org/Qwen-Image_ComfyUI"}
                ]
            },
            {
                "id": "audio.tts",
                "runtime": "onnx",
                "repo_id": "org/tts",
                "variants": [{"id": "base", "approx_size_gb": 1.0}]
            }
        ]
    }"#;

    pub(crate) fn sample_registry() -> ModelRegistry {
        ModelRegistry::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_models_keep_document_order() {
        let registry = sample_registry();
        let ids: Vec<_> = registry.all_models().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["chat.qwen3-next-80b-a3b", "image.qwen-image", "audio.tts"]);
        assert_eq!(registry.machine_profile().name, "Test Mac");
    }

    #[test]
    fn test_unknown_runtime_maps_to_other() {
        let registry = sample_registry();
        assert_eq!(registry.get_model("audio.tts").unwrap().runtime, Runtime::Other);
    }

    #[test]
    fn test_get_variant_uses_parent_repo() {
        let registry = sample_registry();
        let variant = registry
            .get_variant("chat.qwen3-next-80b-a3b", "Q2_K")
            .unwrap();
        assert_eq!(variant.repo_id, "unsloth/Qwen3-Next-80B-A3B-Instruct-GGUF");
        assert_eq!(variant.runtime, Runtime::LlamaCpp);
        assert_eq!(variant.include_file(), Some("model-Q2_K.gguf"));
    }

    #[test]
    fn test_get_variant_prefers_override() {
        let registry = sample_registry();
        let variant = registry.get_variant("image.qwen-image", "fp8").unwrap();
        assert_eq!(variant.repo_id, "Comfy-Org/Qwen-Image_ComfyUI");
        assert_eq!(variant.runtime, Runtime::Diffusers);
        assert_eq!(variant.include_file(), None);
    }

    #[test]
    fn test_unknown_ids() {
        let registry = sample_registry();
        assert!(matches!(
            registry.get_model("nope"),
            Err(RegistryError::ModelNotFound(id)) if id == "nope"
        ));
        let err = registry
            .get_variant("chat.qwen3-next-80b-a3b", "Q8_0")
            .unwrap_err();
        assert!(err.to_string().contains("Q8_0"));
        assert!(matches!(err, RegistryError::VariantNotFound { .. }));
    }

    #[test]
    fn test_empty_repo_is_rejected() {
        let raw = r#"{
            "machine_profile": {"name": "x", "unified_memory_gb": 16, "default_reserve_gb": 4},
            "models": [{"id": "m", "runtime": "other", "repo_id": "", "variants": [{"id": "v", "approx_size_gb": 1}]}]
        }"#;
        assert!(matches!(
            ModelRegistry::from_json(raw),
            Err(RegistryError::Invalid(_))
        ));
    }

    #[test]
    fn test_duplicate_model_is_rejected() {
        let raw = r#"{
            "machine_profile": {"name": "x", "unified_memory_gb": 16, "default_reserve_gb": 4},
            "models": [
                {"id": "m", "runtime": "other", "repo_id": "a/b", "variants": []},
                {"id": "m", "runtime": "other", "repo_id": "a/c", "variants": []}
            ]
        }"#;
        assert!(matches!(
            ModelRegistry::from_json(raw),
            Err(RegistryError::Invalid(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_shipped_registry_only_has_q3_or_smaller_chat_variants() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../registry/models.json");
        let registry = ModelRegistry::load(&path).unwrap();
        for model_id in ["chat.qwen3-next-80b-a3b", "code.qwen3-coder-next"] {
            let model = registry.get_model(model_id).unwrap();
            for variant in &model.variants {
                assert!(variant.id.starts_with("Q3") || variant.id.starts_with("Q2"));
            }
        }
    }
}
