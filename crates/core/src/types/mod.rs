//! Shared newtype wrappers and enums.
//!
//! These types provide compile-time safety for values that would otherwise
//! be passed around as bare strings.

mod email;
mod id;
mod status;

pub use email::{Email, EmailError};
pub use id::{DocumentId, OrderId, PostId, ProductId, UserId, VariantId};
pub use status::{OrderStatus, PaymentStatus, Role, StatusTransitionError};
