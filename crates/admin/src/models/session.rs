//! Session-related types.

use serde::{Deserialize, Serialize};

use driftwood_core::{Email, UserId};

/// Session-stored staff identity.
///
/// Only the identity is stored. The role and active flag are re-read from
/// the `users` document on every request by the auth middleware, so a role
/// change or deactivation takes effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Identity service user id; doubles as the `users` document id.
    pub id: UserId,
    /// Staff member's email address.
    pub email: Email,
}

/// Session keys for admin state.
pub mod keys {
    /// Key for storing the current logged-in staff identity.
    pub const CURRENT_STAFF: &str = "current_staff";
}
