//! User records mirrored from the `users` collection.
//!
//! The hosted authentication service owns credentials; this document carries
//! profile data, the role used for dashboard authorization, and aggregate
//! purchase figures maintained by the admin binary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// A user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
    /// Inactive users may not sign in; toggled from the dashboard.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Lifetime spend across paid orders.
    #[serde(default)]
    pub total_spent: Decimal,
    /// Lifetime order count.
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_defaults() {
        let u: User = serde_json::from_str(
            r#"{"id": "usr_1", "name": "Mara Ellis", "email": "mara@example.com"}"#,
        )
        .unwrap();

        assert_eq!(u.role, Role::Customer);
        assert!(u.active);
        assert_eq!(u.order_count, 0);
        assert_eq!(u.total_spent, Decimal::ZERO);
    }
}
