//! Staff authentication handlers.
//!
//! Sign-in verifies the password against the identity service, then checks
//! the `users` document for a staff role before granting a session. The role
//! itself is never stored in the session; see the middleware.

use axum::{Json, extract::State};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use driftwood_core::types::{Email, Role};

use crate::error::{AdminError, Result};
use crate::middleware::{RequireStaff, clear_current_staff, set_current_staff};
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Staff identity response.
#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// POST /api/auth/login
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<StaffResponse>> {
    let email = Email::parse(&body.email).map_err(driftwood_backend::AuthError::InvalidEmail)?;

    let identity = state.auth().sign_in(&email, &body.password).await?;

    let user = match state.store().users().get(&identity.id).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => {
            warn!(user_id = %identity.id, "login for identity without a profile document");
            return Err(AdminError::Forbidden("not a staff account".to_owned()));
        }
        Err(e) => return Err(AdminError::from(e)),
    };

    if !user.active {
        return Err(AdminError::from(
            driftwood_backend::AuthError::AccountDisabled,
        ));
    }
    if !user.role.is_staff() {
        // Valid customer credentials, but no dashboard access.
        return Err(AdminError::Forbidden("not a staff account".to_owned()));
    }

    set_current_staff(
        &session,
        &CurrentStaff {
            id: user.id.clone(),
            email: user.email.clone(),
        },
    )
    .await?;

    info!(user_id = %user.id, role = %user.role, "staff signed in");

    Ok(Json(StaffResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email.to_string(),
        role: user.role,
    }))
}

/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_staff(&session).await?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/auth/me
#[instrument(skip(staff))]
pub async fn me(staff: RequireStaff) -> Json<StaffResponse> {
    let RequireStaff(user) = staff;
    Json(StaffResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email.to_string(),
        role: user.role,
    })
}
