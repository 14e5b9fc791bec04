//! Authorization extractors for the admin dashboard.
//!
//! The session only proves identity. Both extractors fetch the caller's
//! `users` document and check the role and active flag on every request, so
//! demoting or deactivating a staff member locks them out immediately. A
//! client-supplied role claim is never trusted.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use driftwood_core::users::User;

use crate::models::{CurrentStaff, session_keys};
use crate::state::AppState;

/// Extractor that requires a staff (manager or admin) caller.
///
/// Carries the freshly-read user document, so handlers that need the role
/// (e.g. to distinguish manager from admin) don't fetch it twice.
pub struct RequireStaff(pub User);

/// Extractor that requires an admin caller. Managers are rejected.
pub struct RequireAdmin(pub User);

/// Rejection for the authorization extractors.
pub enum StaffRejection {
    /// No session identity, or the account no longer exists.
    Unauthorized,
    /// Identity is valid but the role does not permit access.
    Forbidden,
    /// The role lookup itself failed.
    LookupFailed,
}

impl IntoResponse for StaffRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "insufficient permissions"),
            Self::LookupFailed => (StatusCode::BAD_GATEWAY, "authorization check failed"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Resolve the session identity to a fresh user document.
async fn resolve_staff(parts: &mut Parts, state: &AppState) -> Result<User, StaffRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(StaffRejection::Unauthorized)?;

    let staff: CurrentStaff = session
        .get(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
        .ok_or(StaffRejection::Unauthorized)?;

    let user = match state.store().users().get(&staff.id).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => return Err(StaffRejection::Unauthorized),
        Err(_) => return Err(StaffRejection::LookupFailed),
    };

    if !user.active || !user.role.is_staff() {
        return Err(StaffRejection::Forbidden);
    }

    Ok(user)
}

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = StaffRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_staff(parts, state).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = StaffRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_staff(parts, state).await?;
        if user.role != driftwood_core::types::Role::Admin {
            return Err(StaffRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

/// Helper to set the current staff identity in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff identity from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
