//! Memory fit estimation.
//!
//! Estimates whether a variant fits the machine's unified memory once a
//! reserve has been withheld. The estimate is weights plus a fixed,
//! runtime-dependent overhead and KV-cache allowance.

use serde::{Deserialize, Serialize};

use super::registry::{ModelRegistry, RegistryError, Runtime};

/// Fixed overhead allowances for a runtime, in GB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeOverhead {
    pub runtime_overhead_gb: f64,
    pub kv_cache_gb: f64,
}

impl RuntimeOverhead {
    const fn new(runtime_overhead_gb: f64, kv_cache_gb: f64) -> Self {
        Self {
            runtime_overhead_gb,
            kv_cache_gb,
        }
    }

    /// Combined allowance added on top of the weights.
    pub fn total_gb(&self) -> f64 {
        self.runtime_overhead_gb + self.kv_cache_gb
    }

    /// Allowance for `runtime`, falling back to the `other` entry.
    pub fn for_runtime(runtime: Runtime) -> Self {
        OVERHEAD_TABLE
            .iter()
            .find(|(r, _)| *r == runtime)
            .map_or(FALLBACK_OVERHEAD, |(_, overhead)| *overhead)
    }
}

const FALLBACK_OVERHEAD: RuntimeOverhead = RuntimeOverhead::new(1.5, 0.0);

/// Overhead policy keyed by runtime tag.
const OVERHEAD_TABLE: &[(Runtime, RuntimeOverhead)] = &[
    (Runtime::LlamaCpp, RuntimeOverhead::new(2.5, 1.5)),
    (Runtime::Diffusers, RuntimeOverhead::new(4.0, 0.0)),
    (Runtime::Other, FALLBACK_OVERHEAD),
];

/// Verdict of a fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitStatus {
    Fits,
    DoesNotFit,
}

/// Numbers behind a fit verdict, all in GB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitBreakdown {
    pub weights_gb: f64,
    pub runtime_overhead_gb: f64,
    pub kv_cache_gb: f64,
    pub reserve_gb: f64,
    /// May be negative when the reserve exceeds unified memory.
    pub budget_gb: f64,
    pub estimated_total_gb: f64,
}

/// Result of [`FitChecker::check`]. Recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub status: FitStatus,
    pub breakdown: FitBreakdown,
    /// Sibling variants that would fit, in registry order. Empty when the
    /// checked variant fits.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl FitResult {
    pub fn fits(&self) -> bool {
        self.status == FitStatus::Fits
    }
}

/// Pure fit computation over registry data.
#[derive(Debug, Clone, Copy)]
pub struct FitChecker<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> FitChecker<'a> {
    pub const fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Check whether `variant_id` of `model_id` fits with `reserve_gb`
    /// withheld. The reserve is taken as given; range checks belong to the
    /// settings boundary.
    pub fn check(
        &self,
        model_id: &str,
        variant_id: &str,
        reserve_gb: f64,
    ) -> Result<FitResult, RegistryError> {
        let model = self.registry.get_model(model_id)?;
        let variant = self.registry.get_variant(model_id, variant_id)?;

        let overhead = RuntimeOverhead::for_runtime(model.runtime);
        let budget_gb = self.registry.machine_profile().unified_memory_gb - reserve_gb;
        let weights_gb = variant.approx_size_gb;
        let estimated_total_gb = weights_gb + overhead.runtime_overhead_gb + overhead.kv_cache_gb;
        let fits = estimated_total_gb <= budget_gb;

        // The failing variant is not excluded by id; it simply fails the
        // same test.
        let alternatives = if fits {
            Vec::new()
        } else {
            model
                .variants
                .iter()
                .filter(|candidate| {
                    candidate.approx_size_gb
                        + overhead.runtime_overhead_gb
                        + overhead.kv_cache_gb
                        <= budget_gb
                })
                .map(|candidate| candidate.id.clone())
                .collect()
        };

        Ok(FitResult {
            status: if fits {
                FitStatus::Fits
            } else {
                FitStatus::DoesNotFit
            },
            breakdown: FitBreakdown {
                weights_gb,
                runtime_overhead_gb: overhead.runtime_overhead_gb,
                kv_cache_gb: overhead.kv_cache_gb,
                reserve_gb,
                budget_gb,
                estimated_total_gb,
            },
            alternatives,
        })
    }
}
