//! Newsletter signup handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use driftwood_core::types::Email;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// POST /api/newsletter/subscribe
///
/// Idempotent: subscribing an already-subscribed address succeeds quietly.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<serde_json::Value>> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    state.store().subscriptions().subscribe(&email).await?;

    Ok(Json(json!({ "ok": true })))
}
