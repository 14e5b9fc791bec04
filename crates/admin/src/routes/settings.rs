//! Store settings handlers.
//!
//! Settings are a single free-form JSON document (store name, contact
//! details, banner copy). The admin edits whole-document; the storefront
//! reads it through the shared cache.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{AdminError, Result};
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/settings
#[instrument(skip(state, _staff))]
pub async fn show(State(state): State<AppState>, _staff: RequireStaff) -> Result<Json<Value>> {
    Ok(Json(state.store().settings().get().await?))
}

/// PUT /api/settings (admin only)
#[instrument(skip(state, admin, body))]
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let RequireAdmin(actor) = admin;

    if !body.is_object() {
        return Err(AdminError::BadRequest(
            "settings must be a JSON object".to_owned(),
        ));
    }

    state.store().settings().update(&body).await?;

    info!(actor = %actor.id, "settings updated");
    Ok(Json(json!({ "ok": true })))
}
