//! Axum-specific error types and mappings.
//!
//! Every error reaching a handler is converted into [`HttpError`] and
//! rendered as `{"error": "...", "status": N}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use workbench_core::{CoreError, HubPortError, RegistryError, RepositoryError};
use workbench_download::DownloadError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed request with values we refuse.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// The hub refused access.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The hub failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Unprocessable(msg)
            | Self::Forbidden(msg)
            | Self::BadGateway(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.message(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Registry(e) => e.into(),
            CoreError::Repository(e) => e.into(),
            CoreError::Settings(e) => Self::Unprocessable(e.to_string()),
        }
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ModelNotFound(_) | RegistryError::VariantNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
        }
    }
}

impl From<DownloadError> for HttpError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::NoFilesSelected => Self::BadRequest(err.to_string()),
            DownloadError::Hub(hub) => hub.into(),
            DownloadError::Io { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<HubPortError> for HttpError {
    fn from(err: HubPortError) -> Self {
        match err {
            HubPortError::AccessDenied { .. } => Self::Forbidden(err.to_string()),
            HubPortError::LocalIo { .. } => Self::Internal(err.to_string()),
            _ => Self::BadGateway(err.to_string()),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}
