//! Task handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::{ChatRequest, ChatResponse};
use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Fixed reply until model workers exist.
pub const CHAT_STUB_ANSWER: &str = "QwenWorkbench is ready. Model workers are not loaded yet (MVP-2). \
    Use Models tab to explore variants, check HF availability, and download explicitly selected variants.";

/// Answer a chat prompt and record the exchange.
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, HttpError> {
    req.validate()?;
    state
        .chat_log
        .append(&req.prompt, &req.system_prompt, CHAT_STUB_ANSWER)
        .await?;
    Ok(Json(ChatResponse {
        answer: CHAT_STUB_ANSWER.to_string(),
    }))
}
