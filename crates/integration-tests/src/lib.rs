//! Integration tests for Driftwood.
//!
//! # Test Categories
//!
//! - `pricing_properties` - End-to-end pricing, filtering, and order-total
//!   behavior exercised through the public core APIs
//! - `storefront_routes` - In-process storefront router tests (no network)
//! - `admin_routes` - In-process admin router tests (no network)
//!
//! The in-process tests point the backend clients at unroutable local URLs;
//! they cover everything that resolves before a store call is made (health,
//! sessions, authorization, input validation).

use secrecy::SecretString;

use driftwood_backend::{AuthConfig, DocStoreConfig};

/// Document store config pointing at an unroutable local port.
#[must_use]
pub fn test_docstore_config() -> DocStoreConfig {
    DocStoreConfig {
        base_url: "http://127.0.0.1:1/v1/projects/test".to_string(),
        api_key: SecretString::from("test-key"),
    }
}

/// Auth config pointing at an unroutable local port.
#[must_use]
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        base_url: "http://127.0.0.1:1/v1".to_string(),
        api_key: SecretString::from("test-key"),
    }
}
