//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AdminError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AdminError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use driftwood_backend::{AuthError, DocStoreError};
use driftwood_core::types::StatusTransitionError;

/// Application-level error type for the admin dashboard.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Document store operation failed.
    #[error("Document store error: {0}")]
    DocStore(#[from] DocStoreError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Order status change violates the lifecycle.
    #[error("Invalid status transition: {0}")]
    Transition(#[from] StatusTransitionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller's role does not permit the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Whether the error is worth reporting to Sentry. Expected client
    /// errors (bad input, denied access, missing documents) are not.
    const fn is_reportable(&self) -> bool {
        match self {
            Self::DocStore(e) => !e.is_not_found(),
            Self::Session(_) | Self::Internal(_) => true,
            Self::Auth(_)
            | Self::Transition(_)
            | Self::NotFound(_)
            | Self::Unauthorized(_)
            | Self::Forbidden(_)
            | Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        if self.is_reportable() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::DocStore(err) => match err {
                DocStoreError::NotFound(_) => StatusCode::NOT_FOUND,
                DocStoreError::RateLimited(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::AccountDisabled => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transition(_) | Self::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::DocStore(err) => match err {
                DocStoreError::NotFound(_) => "Not found".to_string(),
                DocStoreError::RateLimited(_) => "Service busy, try again shortly".to_string(),
                _ => "External service error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::AccountDisabled => "This account has been disabled".to_string(),
                _ => "Authentication error".to_string(),
            },
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AdminError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AdminError::Forbidden("managers cannot do this".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AdminError::Unauthorized("no session".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AdminError::BadRequest("bad discount".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_transition_error_is_unprocessable() {
        let err = AdminError::Transition(StatusTransitionError {
            from: "delivered".to_string(),
            to: "pending".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
