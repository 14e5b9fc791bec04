//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (pings the doc store)
//!
//! # Catalog
//! GET  /api/home                    - Featured/bestseller strips + latest posts
//! GET  /api/products                - Product listing (filter + sort params)
//! GET  /api/products/{slug}         - Product detail (records recently-viewed)
//! GET  /api/products/{slug}/related - Same-category products
//!
//! # Cart (session-backed)
//! GET    /api/cart                  - Current cart
//! POST   /api/cart/add              - Add a line (server resolves the price)
//! POST   /api/cart/update           - Set a line's quantity (0 removes)
//! POST   /api/cart/remove           - Remove a line
//! GET    /api/cart/count            - Item count badge
//!
//! # Checkout
//! POST /api/checkout                - Place an order from the session cart
//!
//! # Wishlist / recently viewed (session-backed)
//! GET    /api/wishlist              - Wishlist products
//! POST   /api/wishlist/{id}         - Add a product
//! DELETE /api/wishlist/{id}         - Remove a product
//! GET    /api/recently-viewed       - Recently viewed products (newest first)
//!
//! # Auth
//! POST /api/auth/register           - Create an account
//! POST /api/auth/login              - Sign in
//! POST /api/auth/logout             - Sign out
//! GET  /api/auth/me                 - Current session identity
//!
//! # Account (requires auth)
//! GET   /api/account                - Profile
//! PATCH /api/account                - Update profile name
//! GET   /api/account/orders         - Order history for the signed-in email
//!
//! # Content
//! GET  /api/blog                    - Blog post listing
//! GET  /api/blog/{slug}             - Blog post detail
//! POST /api/newsletter/subscribe    - Newsletter signup (idempotent)
//!
//! # Assistant
//! POST /api/chat                    - Chat completion via the text endpoint
//! ```

pub mod account;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod home;
pub mod newsletter;
pub mod products;
pub mod recent;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
        .route("/{slug}/related", get(products::related))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show).patch(account::update))
        .route("/orders", get(account::orders))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index))
        .route("/{id}", post(wishlist::add).delete(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::home))
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(checkout::checkout))
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/recently-viewed", get(recent::index))
        .nest("/api/auth", auth_routes())
        .nest("/api/account", account_routes())
        .route("/api/blog", get(blog::index))
        .route("/api/blog/{slug}", get(blog::show))
        .route("/api/newsletter/subscribe", post(newsletter::subscribe))
        .route("/api/chat", post(chat::chat))
}
