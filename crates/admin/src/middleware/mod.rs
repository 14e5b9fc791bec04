//! Middleware for the admin dashboard.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireStaff, clear_current_staff, set_current_staff};
pub use session::create_session_layer;
