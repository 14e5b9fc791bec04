//! Configuration structs for the hosted service clients.
//!
//! These are constructed by each binary's env-loading config module and
//! passed into the client constructors.

use secrecy::SecretString;

/// Hosted document store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct DocStoreConfig {
    /// Base URL of the document store project
    /// (e.g. `https://store.example-baas.dev/v1/projects/driftwood`).
    pub base_url: String,
    /// Server-side API key.
    pub api_key: SecretString,
}

impl std::fmt::Debug for DocStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Hosted authentication service configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// Base URL of the identity endpoint
    /// (e.g. `https://identity.example-baas.dev/v1`).
    pub base_url: String,
    /// Server-side API key.
    pub api_key: SecretString,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Generative text endpoint configuration.
#[derive(Clone)]
pub struct ChatConfig {
    /// Endpoint URL for the completion call.
    pub endpoint: String,
    /// API key.
    pub api_key: SecretString,
    /// Model identifier sent with each request.
    pub model: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}
