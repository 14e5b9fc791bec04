//! Application state shared across admin handlers.

use std::sync::Arc;

use driftwood_backend::{AuthClient, DocStore};

use crate::config::AdminConfig;

/// Error constructing application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("document store client: {0}")]
    DocStore(#[from] driftwood_backend::DocStoreError),
    #[error("auth client: {0}")]
    Auth(#[from] driftwood_backend::AuthError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The admin uses the same document store
/// client as the storefront; there is no privileged API beyond what the
/// server-side key already grants, so authorization is enforced entirely in
/// this binary's middleware.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: DocStore,
    auth: AuthClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if any backend client fails to construct.
    pub fn new(config: AdminConfig) -> Result<Self, StateError> {
        let store = DocStore::new(&config.docstore)?;
        let auth = AuthClient::new(&config.auth)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the document store client.
    #[must_use]
    pub fn store(&self) -> &DocStore {
        &self.inner.store
    }

    /// Get a reference to the hosted auth client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }
}
