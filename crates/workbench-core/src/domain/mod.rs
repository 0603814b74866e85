//! Domain types for the model catalog and memory fit estimation.

mod fit;
mod registry;

pub use fit::{FitBreakdown, FitChecker, FitResult, FitStatus, RuntimeOverhead};
pub use registry::{
    MachineProfile, Model, ModelRegistry, RegistryError, ResolvedVariant, Runtime, Variant,
};
