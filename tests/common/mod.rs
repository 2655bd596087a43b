//! Common test utilities and helpers
//!
//! - An in-process app over an in-memory SQLite database with a manual clock
//! - User fixtures with cheap bcrypt hashes
//! - Request helpers that drive the router with `tower::ServiceExt::oneshot`

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use storefront::backend::auth::password::hash_password_with_cost;
use storefront::backend::auth::users::{create_user, Principal};
use storefront::backend::auth::{ManualClock, SqlCredentialStore, TokenService};
use storefront::backend::routes::create_router;
use storefront::backend::server::config::connect_database;
use storefront::backend::server::{AppState, AuthConfig};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "secret123";

/// Test application
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = connect_database("sqlite::memory:")
            .await
            .expect("Failed to open test database");
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(SqlCredentialStore::new(pool.clone()));
        let tokens = Arc::new(
            TokenService::new(&AuthConfig::new(TEST_SECRET), store).with_clock(clock.clone()),
        );
        let router = create_router(AppState::with_token_service(pool.clone(), tokens.clone()));

        Self {
            router,
            pool,
            tokens,
            clock,
        }
    }

    /// Store a user whose password is `TEST_PASSWORD`
    pub async fn create_user(&self, username: &str) -> Principal {
        let hash = hash_password_with_cost(TEST_PASSWORD, 4)
            .await
            .expect("Failed to hash test password");
        create_user(&self.pool, &Principal::new(username, hash).with_email(format!("{username}@example.com")))
            .await
            .expect("Failed to create test user")
    }

    /// Log in through `POST /token` and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send(form_request("/token", &format!("username={username}&password={password}")))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Assert a 401 carrying the bearer challenge
    pub fn assert_unauthorized(&self) {
        assert_eq!(self.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            self.headers
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    json_request(Method::GET, uri, token, None)
}
