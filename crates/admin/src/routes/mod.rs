//! HTTP route handlers for the admin dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check
//!
//! # Auth
//! POST /api/auth/login              - Staff sign-in (role checked server-side)
//! POST /api/auth/logout             - Sign out
//! GET  /api/auth/me                 - Current staff identity + fresh role
//!
//! # Dashboard (staff)
//! GET  /api/dashboard               - Counts and revenue summary
//!
//! # Products (staff read, admin write)
//! GET    /api/products              - Full catalog including disabled
//! POST   /api/products              - Create product
//! GET    /api/products/{id}         - Product detail
//! PUT    /api/products/{id}         - Replace product
//! DELETE /api/products/{id}         - Delete product
//!
//! # Orders (staff)
//! GET   /api/orders                 - Order listing
//! GET   /api/orders/{id}           - Order detail
//! PATCH /api/orders/{id}/status    - Advance fulfillment/payment status
//!
//! # Customers (staff read, admin for role changes)
//! GET  /api/customers               - Customer listing with aggregates
//! GET  /api/customers/{id}          - Customer detail
//! POST /api/customers/{id}/active   - Toggle the active flag
//! POST /api/customers/{id}/role     - Change role (admin only)
//! POST /api/customers/{id}/recompute - Recompute purchase aggregates
//!
//! # Blog (staff read, admin write)
//! GET    /api/blog                  - Post listing
//! POST   /api/blog                  - Create post (slug must be unique)
//! GET    /api/blog/{id}             - Post detail
//! PUT    /api/blog/{id}             - Replace post
//! DELETE /api/blog/{id}             - Delete post
//!
//! # Settings (staff read, admin write)
//! GET /api/settings                 - Store settings document
//! PUT /api/settings                 - Replace store settings
//! ```

pub mod auth;
pub mod blog;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/{id}", get(customers::show))
        .route("/{id}/active", post(customers::set_active))
        .route("/{id}/role", post(customers::set_role))
        .route("/{id}/recompute", post(customers::recompute))
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::index).post(blog::create))
        .route(
            "/{id}",
            get(blog::show).put(blog::update).delete(blog::destroy),
        )
}

/// Create all routes for the admin dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .route("/api/dashboard", get(dashboard::summary))
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/customers", customer_routes())
        .nest("/api/blog", blog_routes())
        .route(
            "/api/settings",
            get(settings::show).put(settings::update),
        )
}
