//! Hosted authentication service client.
//!
//! The identity service owns credentials; this client performs email/password
//! sign-up and sign-in and maps the provider's error codes to a small fixed
//! error set. Roles are NOT part of the identity service - they live on the
//! `users` document and are checked server-side by the admin middleware.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use driftwood_core::types::{Email, UserId};

use crate::config::AuthConfig;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] driftwood_core::EmailError),

    /// Invalid credentials (wrong password or unknown account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("email already in use")]
    EmailInUse,

    /// Password rejected by the identity service.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Account exists but has been disabled.
    #[error("account disabled")]
    AccountDisabled,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity service returned an unrecognized error.
    #[error("identity service error: {0}")]
    Provider(String),
}

/// Identity returned by the hosted service on success.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Stable user id; doubles as the id of the `users` document.
    pub id: UserId,
    pub email: Email,
}

/// Wire shape of a successful identity response.
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    user_id: String,
    email: String,
}

/// Wire shape of an identity error response.
#[derive(Debug, Deserialize)]
struct IdentityErrorResponse {
    error: IdentityErrorBody,
}

#[derive(Debug, Deserialize)]
struct IdentityErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// Client for the hosted authentication service.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| AuthError::Provider(format!("invalid API key: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Register a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailInUse`] if the address is taken, or
    /// [`AuthError::WeakPassword`] if the service rejects the password.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthUser, AuthError> {
        self.call(
            "accounts:signUp",
            &json!({
                "email": email.as_str(),
                "password": password.expose_secret(),
            }),
        )
        .await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for a wrong password or
    /// unknown account - the two are deliberately indistinguishable.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthUser, AuthError> {
        self.call(
            "accounts:signInWithPassword",
            &json!({
                "email": email.as_str(),
                "password": password.expose_secret(),
            }),
        )
        .await
    }

    async fn call(&self, method: &str, body: &serde_json::Value) -> Result<AuthUser, AuthError> {
        let url = format!("{}/{method}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            let identity: IdentityResponse = response.json().await?;
            let email = Email::parse(&identity.email)?;
            return Ok(AuthUser {
                id: UserId::new(identity.user_id),
                email,
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_provider_error(&body))
    }
}

/// Map the provider's error codes to the fixed [`AuthError`] set.
fn map_provider_error(body: &str) -> AuthError {
    let Ok(parsed) = serde_json::from_str::<IdentityErrorResponse>(body) else {
        return AuthError::Provider(body.chars().take(200).collect());
    };

    match parsed.error.code.as_str() {
        "EMAIL_EXISTS" => AuthError::EmailInUse,
        "INVALID_CREDENTIALS" | "INVALID_PASSWORD" | "USER_NOT_FOUND" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => AuthError::WeakPassword(parsed.error.message),
        "USER_DISABLED" => AuthError::AccountDisabled,
        other => AuthError::Provider(other.to_owned()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_map_provider_error_codes() {
        let body = r#"{"error":{"code":"EMAIL_EXISTS","message":""}}"#;
        assert!(matches!(map_provider_error(body), AuthError::EmailInUse));

        let body = r#"{"error":{"code":"INVALID_PASSWORD","message":""}}"#;
        assert!(matches!(
            map_provider_error(body),
            AuthError::InvalidCredentials
        ));

        // Unknown accounts map to the same error as wrong passwords.
        let body = r#"{"error":{"code":"USER_NOT_FOUND","message":""}}"#;
        assert!(matches!(
            map_provider_error(body),
            AuthError::InvalidCredentials
        ));

        let body = r#"{"error":{"code":"WEAK_PASSWORD","message":"too short"}}"#;
        match map_provider_error(body) {
            AuthError::WeakPassword(msg) => assert_eq!(msg, "too short"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_map_unparseable_body() {
        assert!(matches!(
            map_provider_error("<html>gateway timeout</html>"),
            AuthError::Provider(_)
        ));
    }
}
