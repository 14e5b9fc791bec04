//! Authentication route handlers.
//!
//! Credentials live in the hosted identity service; the matching `users`
//! document carries the profile and role. Sign-in checks the document's
//! `active` flag server-side so a disabled account cannot get a session even
//! with a valid password.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use driftwood_core::types::{Email, Role};
use driftwood_core::users::User;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Identity response returned by register/login/me.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&CurrentUser> for IdentityResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.to_string(),
        }
    }
}

/// POST /api/auth/register
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<IdentityResponse>)> {
    let name = body.name.trim().to_owned();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    let email =
        Email::parse(&body.email).map_err(driftwood_backend::AuthError::InvalidEmail)?;

    let identity = state.auth().sign_up(&email, &body.password).await?;

    // Mirror the identity into a profile document under the same id.
    let now = chrono::Utc::now();
    let user = User {
        id: identity.id.clone(),
        name: name.clone(),
        email: identity.email.clone(),
        role: Role::Customer,
        active: true,
        total_spent: Decimal::ZERO,
        order_count: 0,
        created_at: Some(now),
        updated_at: Some(now),
    };
    state.store().users().put(&user).await?;

    let current = CurrentUser {
        id: identity.id,
        email: identity.email,
        name,
    };
    set_current_user(&session, &current).await?;

    info!(user_id = %current.id, "account created");
    Ok((StatusCode::CREATED, Json(IdentityResponse::from(&current))))
}

/// POST /api/auth/login
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<IdentityResponse>> {
    let email =
        Email::parse(&body.email).map_err(driftwood_backend::AuthError::InvalidEmail)?;

    let identity = state.auth().sign_in(&email, &body.password).await?;

    // The profile document is authoritative for the active flag.
    let profile = match state.store().users().get(&identity.id).await {
        Ok(profile) => profile,
        Err(e) if e.is_not_found() => {
            // Identity exists without a profile (e.g. seeded account); create one.
            warn!(user_id = %identity.id, "no profile document for identity, creating");
            let now = chrono::Utc::now();
            let user = User {
                id: identity.id.clone(),
                name: String::new(),
                email: identity.email.clone(),
                role: Role::Customer,
                active: true,
                total_spent: Decimal::ZERO,
                order_count: 0,
                created_at: Some(now),
                updated_at: Some(now),
            };
            state.store().users().put(&user).await?;
            user
        }
        Err(e) => return Err(AppError::from(e)),
    };

    if !profile.active {
        return Err(AppError::from(driftwood_backend::AuthError::AccountDisabled));
    }

    let current = CurrentUser {
        id: identity.id,
        email: identity.email,
        name: profile.name,
    };
    set_current_user(&session, &current).await?;

    info!(user_id = %current.id, "signed in");
    Ok(Json(IdentityResponse::from(&current)))
}

/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session).await?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/auth/me
#[instrument(skip(auth))]
pub async fn me(auth: OptionalAuth) -> Json<serde_json::Value> {
    let OptionalAuth(user) = auth;
    match user {
        Some(user) => Json(json!({ "user": IdentityResponse::from(&user) })),
        None => Json(json!({ "user": null })),
    }
}
