//! Classification of hub failures into probe results.

use workbench_core::HubPortError;

use crate::types::RepoProbe;

/// Message shown when the hub refuses access to a repository.
pub const AUTH_REQUIRED_MESSAGE: &str =
    "HF token required or access not granted for this repository.";

/// Turn a listing failure into an unavailable probe.
pub(super) fn classify(err: &HubPortError) -> RepoProbe {
    match err {
        HubPortError::AccessDenied { .. } => {
            RepoProbe::unavailable(true, AUTH_REQUIRED_MESSAGE.to_string())
        }
        HubPortError::Http { status, message } => {
            RepoProbe::unavailable(false, format!("HF error ({status}): {message}"))
        }
        HubPortError::Network { message }
        | HubPortError::InvalidResponse { message }
        | HubPortError::LocalIo { message, .. } => {
            RepoProbe::unavailable(false, format!("HF error: {message}"))
        }
    }
}
