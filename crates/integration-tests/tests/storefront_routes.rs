//! In-process storefront router tests.
//!
//! The backend clients point at an unroutable port, so these cover the
//! behavior that resolves before any store call: sessions, authorization,
//! and input validation.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use driftwood_integration_tests::{test_auth_config, test_docstore_config};
use driftwood_storefront::config::StorefrontConfig;
use driftwood_storefront::middleware::create_session_layer;
use driftwood_storefront::routes;
use driftwood_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        docstore: test_docstore_config(),
        auth: test_auth_config(),
        chat: None,
        sentry_dsn: None,
    }
}

fn app() -> Router {
    let config = test_config();
    let state = AppState::new(config).unwrap();
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_empty_cart_is_ok() {
    let response = app()
        .oneshot(Request::get("/api/cart").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["item_count"], 0);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_cart_count_starts_at_zero() {
    let response = app()
        .oneshot(Request::get("/api/cart/count").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["count"], 0);
}

#[tokio::test]
async fn test_cart_add_rejects_zero_quantity() {
    let response = app()
        .oneshot(post_json(
            "/api/cart/add",
            &json!({ "product_id": "prod_1", "quantity": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_update_unknown_line_is_404() {
    let response = app()
        .oneshot(post_json(
            "/api/cart/update",
            &json!({ "product_id": "prod_missing", "quantity": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let response = app()
        .oneshot(post_json(
            "/api/checkout",
            &json!({
                "email": "mara@example.com",
                "name": "Mara Ellis",
                "address": {
                    "line1": "12 Shore Rd",
                    "city": "Portree",
                    "postal_code": "IV51 9ES",
                    "country": "GB"
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Bad request: cart is empty");
}

#[tokio::test]
async fn test_account_requires_auth() {
    let response = app()
        .oneshot(Request::get("/api/account").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_account_orders_requires_auth() {
    let response = app()
        .oneshot(
            Request::get("/api/account/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_without_session_is_null() {
    let response = app()
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["user"], Value::Null);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let response = app()
        .oneshot(post_json(
            "/api/auth/register",
            &json!({ "name": "Mara", "email": "not-an-email", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_newsletter_rejects_invalid_email() {
    let response = app()
        .oneshot(post_json(
            "/api/newsletter/subscribe",
            &json!({ "email": "nope" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_unconfigured_is_503() {
    let response = app()
        .oneshot(post_json("/api/chat", &json!({ "message": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_wishlist_add_and_list_are_session_scoped() {
    let app = app();

    // Adding succeeds with no body.
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/wishlist/prod_1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A separate request carries no session cookie, so the list is empty
    // and never touches the store.
    let response = app
        .oneshot(Request::get("/api/wishlist").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_recently_viewed_starts_empty() {
    let response = app()
        .oneshot(
            Request::get("/api/recently-viewed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}
