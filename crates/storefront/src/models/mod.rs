//! Data models for the storefront.

pub mod cart;
pub mod session;

pub use cart::{CartLine, CartView};
pub use session::{CurrentUser, keys as session_keys};
