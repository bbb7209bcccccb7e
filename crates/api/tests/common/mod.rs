//! Shared helpers for HTTP-level integration tests.
//!
//! The app is built with the same router/middleware stack production uses
//! (see `build_app_router`), an in-memory access-token cache standing in
//! for Redis, and a fixed JWT secret.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use lockstash_api::auth::jwt::JwtConfig;
use lockstash_api::config::ServerConfig;
use lockstash_api::router::build_app_router;
use lockstash_api::state::AppState;
use lockstash_cache::MemoryAccessCache;
use lockstash_core::crypto::Encryptor;

/// A valid device fingerprint (32 alphanumeric chars).
pub const FINGERPRINT: &str = "f1b7e156414663c4b81fbadadedcf01f";

/// A second, different fingerprint of the same shape.
pub const OTHER_FINGERPRINT: &str = "0000000011111111222222223333333f";

/// Build a test `ServerConfig` with safe defaults and a fixed secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an in-memory access cache.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        cache: Arc::new(MemoryAccessCache::new()),
        config: Arc::new(config.clone()),
        encryptor: Arc::new(Encryptor::new(config.jwt.secret.clone())),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Fire one request through the router.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn json_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with the refresh-token cookie set (the refresh endpoint).
pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: Value,
    refresh_token: &str,
) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .header(COOKIE, format!("refresh_token={refresh_token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = json_request(Method::PATCH, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Account/session helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and return the response body.
pub async fn register_user(app: Router, email: &str, password: &str) -> Value {
    let body = serde_json::json!({ "email": email, "password": password, "name": "Test User" });
    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in via the API with the given fingerprint and return the token-pair
/// body (`access_token`, `refresh_token`, expirations).
pub async fn login_user(app: Router, email: &str, password: &str, fingerprint: &str) -> Value {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "fingerprint": fingerprint,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Register + login in one step, returning `(access_token, refresh_token)`.
pub async fn register_and_login(app: Router, email: &str, password: &str) -> (String, String) {
    register_user(app.clone(), email, password).await;
    let tokens = login_user(app, email, password, FINGERPRINT).await;
    (
        tokens["access_token"].as_str().unwrap().to_string(),
        tokens["refresh_token"].as_str().unwrap().to_string(),
    )
}
