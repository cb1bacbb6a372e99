//! Authentication test helpers
//!
//! Builds the full application over the in-memory credential store and
//! drives it with `tower::ServiceExt::oneshot`, so no socket or database is
//! needed.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use opsdesk::backend::server::create_app;
use opsdesk::shared::config::MIN_BCRYPT_COST;
use opsdesk::shared::AppConfig;

/// Signing secret shared by the test app and hand-crafted tokens
pub const TEST_SECRET: &str = "integration-test-secret-32-bytes-long";

/// Token lifetime of the test app
pub const TEST_TTL_SECS: i64 = 3600;

/// Bootstrap administrator seeded into every test app (id 1)
pub const ADMIN_EMAIL: &str = "john@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Configuration of the test app: memory store, cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .token_ttl_secs(TEST_TTL_SECS)
        .bcrypt_cost(MIN_BCRYPT_COST)
        .bootstrap_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
        .build()
        .expect("test configuration is valid")
}

/// Fresh application with only the bootstrap administrator
pub async fn test_app() -> Router {
    create_app(&test_config()).await.expect("Failed to create app")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Send one request and return the status and JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    send_request(app, request).await
}

/// Send a prepared request
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

/// Log in and return the access token
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"]
        .as_str()
        .expect("access_token in login response")
        .to_string()
}

/// Token of the bootstrap administrator
pub async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Register an identity and return its id
pub async fn register_user(app: &Router, email: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "display_name": "Test User",
            "email": email,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["id"].as_i64().expect("id in registration response")
}

/// Register an identity, then give it `roles` and `permissions` as the admin
pub async fn create_user_with(
    app: &Router,
    email: &str,
    password: &str,
    roles: &[&str],
    permissions: &[&str],
) -> i64 {
    let id = register_user(app, email, password).await;
    let admin = admin_token(app).await;

    let (status, body) = send(
        app,
        Method::PUT,
        &format!("/users/{}/roles", id),
        Some(admin.as_str()),
        Some(json!({ "roles": roles })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "role update failed: {}", body);

    let (status, body) = send(
        app,
        Method::PUT,
        &format!("/users/{}/permissions", id),
        Some(admin.as_str()),
        Some(json!({ "permissions": permissions })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "permission update failed: {}", body);

    id
}
