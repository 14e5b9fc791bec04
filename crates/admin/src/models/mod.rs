//! Data models for the admin dashboard.

pub mod session;

pub use session::{CurrentStaff, keys as session_keys};
