//! Task DTOs.

use serde::{Deserialize, Serialize};

use crate::error::HttpError;

/// Body of `POST /tasks/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub system_prompt: String,
}

impl ChatRequest {
    /// Reject an empty prompt.
    pub fn validate(&self) -> Result<(), HttpError> {
        if self.prompt.is_empty() {
            return Err(HttpError::Unprocessable(
                "prompt must be at least 1 character".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response of `POST /tasks/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}
