//! Chat widget handler.
//!
//! Proxies the conversation to the generative text endpoint so the API key
//! never reaches the browser. Returns 503 when the widget is not configured.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use driftwood_backend::ChatMessage;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cap on the history the client may replay, to bound request size.
const MAX_HISTORY: usize = 20;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat
#[instrument(skip(state, body), fields(history_len = body.history.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<axum::response::Response> {
    let Some(client) = state.chat() else {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "chat is not configured" })),
        )
            .into_response());
    };

    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_owned()));
    }

    let history: Vec<ChatMessage> = body
        .history
        .into_iter()
        .rev()
        .take(MAX_HISTORY)
        .rev()
        .collect();

    let reply = client.complete(&history, message).await?;

    Ok(Json(ChatResponse { reply }).into_response())
}
