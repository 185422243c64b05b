#![allow(dead_code)]

use hm_auth::{Identity, InMemoryIdentityProvider, WEBHOOK_SIGNATURE_HEADER, sign_payload};
use hm_core::Role;
use hm_server::{AppState, build_router};

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::Request;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const ADMIN_EMAIL: &str = "admin@hostly.test";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub provider: Arc<InMemoryIdentityProvider>,
}

/// App wired for tests: in-memory database, in-memory identity
/// provider, auth disabled (X-Identity-Id header resolution).
pub async fn spawn_app() -> TestApp {
    let pool = create_test_pool().await;
    let provider = Arc::new(InMemoryIdentityProvider::new());

    let state = AppState {
        pool,
        identity: provider.clone(),
        jwt_validator: None,
        webhook_secret: WEBHOOK_SECRET.into(),
        admin_email: Some(ADMIN_EMAIL.to_string()),
    };

    TestApp {
        router: build_router(state.clone()),
        state,
        provider,
    }
}

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("../crates/hm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// An identity as the provider would hold it after sign-up
pub fn identity(id: &str, email: &str, role: Option<Role>) -> Identity {
    Identity {
        id: id.to_string(),
        email_addresses: vec![email.to_string()],
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        role,
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

pub fn get_as(path: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header("X-Identity-Id", user_id)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json_as(path: &str, user_id: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("X-Identity-Id", user_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// A correctly signed identity-event webhook request
pub fn signed_webhook(envelope: &serde_json::Value) -> Request<Body> {
    let payload = envelope.to_string();
    let signature = sign_payload(WEBHOOK_SECRET.as_bytes(), payload.as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/webhooks/identity")
        .header("content-type", "application/json")
        .header(WEBHOOK_SIGNATURE_HEADER, signature)
        .body(Body::from(payload))
        .expect("request")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub fn location_header(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}
