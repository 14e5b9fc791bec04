//! In-process admin router tests.
//!
//! Unauthenticated paths run against an unroutable backend: nothing may
//! leak without a session. The role-boundary tests run against a small
//! in-process stand-in for the document store, so the extractors resolve
//! a real user document and the manager/admin split is exercised end to
//! end.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;
use tower::util::ServiceExt;
use tower_sessions::Session;

use driftwood_admin::config::AdminConfig;
use driftwood_admin::middleware::{create_session_layer, set_current_staff};
use driftwood_admin::models::CurrentStaff;
use driftwood_admin::routes;
use driftwood_admin::state::AppState;
use driftwood_backend::DocStoreConfig;
use driftwood_core::types::{Email, UserId};
use driftwood_integration_tests::{test_auth_config, test_docstore_config};

fn test_config() -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        docstore: test_docstore_config(),
        auth: test_auth_config(),
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

async fn assert_unauthorized(uri: &str) {
    let response = app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        StatusCode::UNAUTHORIZED,
        "GET {uri} leaked without a session"
    );
}

#[tokio::test]
async fn test_reads_require_session() {
    assert_unauthorized("/api/dashboard").await;
    assert_unauthorized("/api/products").await;
    assert_unauthorized("/api/orders").await;
    assert_unauthorized("/api/customers").await;
    assert_unauthorized("/api/blog").await;
    assert_unauthorized("/api/settings").await;
    assert_unauthorized("/api/auth/me").await;
}

#[tokio::test]
async fn test_mutations_require_session() {
    let cases = [
        ("POST", "/api/products"),
        ("PUT", "/api/products/prod_1"),
        ("DELETE", "/api/products/prod_1"),
        ("PATCH", "/api/orders/ord_1/status"),
        ("POST", "/api/customers/usr_1/role"),
        ("POST", "/api/customers/usr_1/active"),
        ("PUT", "/api/settings"),
    ];

    for (method, uri) in cases {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} leaked without a session"
        );
    }
}

/// Serve just enough of the document store API for the authorization
/// extractors: one staff user document with the given role, and an empty
/// blog collection that accepts creates.
async fn spawn_store(role: &'static str) -> String {
    let store = Router::new()
        .route(
            "/collections/users/documents/{id}",
            get(move |Path(id): Path<String>| async move {
                Json(json!({
                    "id": id,
                    "name": "Rowan Finch",
                    "email": "rowan@example.com",
                    "role": role,
                    "active": true,
                }))
            }),
        )
        .route(
            "/collections/blogPosts/documents",
            get(|| async { Json(json!({ "documents": [] })) })
                .post(|| async { Json(json!({ "id": "post_1" })) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, store).await.unwrap();
    });

    format!("http://{addr}")
}

/// Write a staff identity into the session, the way login does.
async fn seed_session(session: Session) -> StatusCode {
    let staff = CurrentStaff {
        id: UserId::new("usr_rowan"),
        email: Email::parse("rowan@example.com").unwrap(),
    };
    set_current_staff(&session, &staff).await.unwrap();
    StatusCode::NO_CONTENT
}

fn app_with_store(base_url: &str) -> Router {
    let mut config = test_config();
    config.docstore = DocStoreConfig {
        base_url: base_url.to_owned(),
        api_key: SecretString::from("test-key"),
    };
    let state = AppState::new(config).unwrap();
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .route("/session", post(seed_session))
        .layer(session_layer)
        .with_state(state)
}

/// Establish a session and return its cookie for follow-up requests.
async fn staff_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::post("/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session layer set no cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_owned()
}

fn post_body() -> String {
    json!({
        "id": "post_new",
        "title": "Sea glass displays",
        "slug": "sea-glass-displays",
        "author": "Rowan Finch"
    })
    .to_string()
}

#[tokio::test]
async fn test_manager_cannot_mutate_blog() {
    let store = spawn_store("manager").await;
    let app = app_with_store(&store);
    let cookie = staff_cookie(&app).await;

    let cases = [
        ("POST", "/api/blog"),
        ("PUT", "/api/blog/post_1"),
        ("DELETE", "/api/blog/post_1"),
    ];

    for (method, uri) in cases {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::COOKIE, cookie.as_str())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(post_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{method} {uri} let a manager mutate blog content"
        );
    }
}

#[tokio::test]
async fn test_manager_can_read_blog() {
    let store = spawn_store("manager").await;
    let app = app_with_store(&store);
    let cookie = staff_cookie(&app).await;

    let response = app
        .oneshot(
            Request::get("/api/blog")
                .header(header::COOKIE, cookie.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_can_create_blog_post() {
    let store = spawn_store("admin").await;
    let app = app_with_store(&store);
    let cookie = staff_cookie(&app).await;

    let response = app
        .oneshot(
            Request::post("/api/blog")
                .header(header::COOKIE, cookie.as_str())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(post_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_logout_without_session_is_ok() {
    // Logging out an absent session is a harmless no-op.
    let response = app()
        .oneshot(
            Request::post("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
