//! Driftwood Backend - clients for the hosted services.
//!
//! # Architecture
//!
//! - The hosted document store is the source of truth - NO local sync,
//!   direct API calls per operation
//! - One shared [`DocStore`] client per process, passed down through
//!   application state rather than held in module-level singletons
//! - In-memory caching via `moka` for catalog reads (5 minute TTL),
//!   invalidated by writes through the same client
//!
//! # Clients
//!
//! - [`DocStore`] - whole-document JSON CRUD over the store's collections
//! - [`AuthClient`] - email/password identity operations
//! - [`ChatClient`] - single-turn generative text calls for the chat widget
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_backend::{DocStore, DocStoreConfig};
//!
//! let store = DocStore::new(&config.docstore)?;
//!
//! // Fetch the catalog
//! let products = store.products().list().await?;
//!
//! // Write an order
//! let id = store.orders().create(&order).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod chat;
mod config;
pub mod docstore;
mod error;

pub use auth::{AuthClient, AuthError, AuthUser};
pub use chat::{ChatClient, ChatError, ChatMessage, ChatRole};
pub use config::{AuthConfig, ChatConfig, DocStoreConfig};
pub use docstore::DocStore;
pub use error::DocStoreError;
