//! Session-related types.
//!
//! The client app used to keep cart/wishlist/recently-viewed as plain JSON
//! arrays in browser local storage under fixed string keys. Server-side,
//! the same arrays live in the session under the keys below.

use serde::{Deserialize, Serialize};

use driftwood_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// Role is deliberately NOT cached here - it is re-read from the user
/// document wherever authorization depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity service user id; doubles as the `users` document id.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
}

/// Session keys for storefront state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the cart line array.
    pub const CART: &str = "cart";

    /// Key for the wishlist product-id array.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the recently-viewed product-id array.
    pub const RECENTLY_VIEWED: &str = "recently_viewed";
}
