//! Shared harness for API integration tests.
//!
//! Mirrors the router construction in `main.rs` (via
//! [`build_app_router`]) so tests exercise the same middleware stack
//! that production uses, with the mock AI provider at zero latency.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use verdant_ai::{MockIdentifier, RetryPolicy};
use verdant_api::auth::jwt::{generate_access_token, JwtConfig};
use verdant_api::config::{AiConfig, AiProviderKind, ServerConfig};
use verdant_api::router::build_app_router;
use verdant_api::state::AppState;
use verdant_db::repositories::UserRepo;

/// Signing secret shared by the test config and [`token_for`].
pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        ai: AiConfig {
            provider: AiProviderKind::Mock,
            service_url: None,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router against the given pool, with the
/// zero-latency mock identifier and millisecond-scale retry backoff.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identifier: Arc::new(MockIdentifier::with_latency(Duration::ZERO)),
        retry: RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            multiplier: 2.0,
        },
    };

    build_app_router(state, &config)
}

/// Insert a user row and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "Test User").await.unwrap().id
}

/// Mint an access token compatible with the test config.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

/// Send a request, optionally authenticated and with a JSON body.
pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

/// GET without authentication.
pub async fn get(app: Router, path: &str) -> Response {
    request(app, Method::GET, path, None, None).await
}

/// GET with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    request(app, Method::GET, path, Some(token), None).await
}

/// POST a JSON body with a Bearer token.
pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    request(app, Method::POST, path, Some(token), Some(body)).await
}

/// PUT a JSON body with a Bearer token.
pub async fn put_json(app: Router, path: &str, token: &str, body: serde_json::Value) -> Response {
    request(app, Method::PUT, path, Some(token), Some(body)).await
}

/// DELETE with a Bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response {
    request(app, Method::DELETE, path, Some(token), None).await
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and decode the body in one step.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status, "unexpected response status");
    body_json(response).await
}
