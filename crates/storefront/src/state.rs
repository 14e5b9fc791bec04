//! Application state shared across handlers.

use std::sync::Arc;

use driftwood_backend::{AuthClient, ChatClient, DocStore};

use crate::config::StorefrontConfig;

/// Error constructing application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("document store client: {0}")]
    DocStore(#[from] driftwood_backend::DocStoreError),
    #[error("auth client: {0}")]
    Auth(#[from] driftwood_backend::AuthError),
    #[error("chat client: {0}")]
    Chat(#[from] driftwood_backend::ChatError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// backend service clients and configuration. Handles are constructed once
/// here and passed down - no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: DocStore,
    auth: AuthClient,
    chat: Option<ChatClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if any backend client fails to construct.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let store = DocStore::new(&config.docstore)?;
        let auth = AuthClient::new(&config.auth)?;
        let chat = config.chat.as_ref().map(ChatClient::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
                chat,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
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

    /// Get a reference to the chat client, if the widget is configured.
    #[must_use]
    pub fn chat(&self) -> Option<&ChatClient> {
        self.inner.chat.as_ref()
    }
}
