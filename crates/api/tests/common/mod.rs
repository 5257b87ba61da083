#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use studio_api::auth::jwt::{generate_access_token, JwtConfig};
use studio_api::auth::password::hash_password;
use studio_api::config::ServerConfig;
use studio_api::router::build_app_router;
use studio_api::state::AppState;
use studio_core::types::DbId;
use studio_db::models::profile::{CreateProfile, Profile};
use studio_db::repositories::ProfileRepo;
use studio_events::{EventBus, Mailer};
use studio_lifecycle::adapters::InMemoryPaymentGateway;
use studio_lifecycle::ports::PaymentGateway;

pub const BASE_URL: &str = "https://studio.test";

pub const STAFF_PASSWORD: &str = "correct-horse-battery";

/// 1x1 transparent PNG as captured by the signing pad.
pub const SIGNATURE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: BASE_URL.to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with an in-memory payment gateway and
/// log-only mail.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(InMemoryPaymentGateway::new()), Mailer::LogOnly)
}

/// Build the full application router around the given providers, through the
/// same [`build_app_router`] the binary uses.
pub fn build_test_app_with(
    pool: PgPool,
    gateway: Arc<dyn PaymentGateway>,
    mailer: Mailer,
) -> Router {
    let config = test_config();
    let state = AppState::new(
        pool,
        config.clone(),
        gateway,
        mailer,
        Arc::new(EventBus::default()),
    );
    build_app_router(state, &config)
}

/// Insert a staff profile with [`STAFF_PASSWORD`] and return it with a
/// bearer token.
pub async fn seed_staff(pool: &PgPool, email: &str, role: &str) -> (Profile, String) {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: Some("Studio Owner".to_string()),
            company_name: None,
            role: role.to_string(),
            password_hash: Some(hash_password(STAFF_PASSWORD).expect("hashing should succeed")),
        },
    )
    .await
    .expect("profile creation should succeed");
    let token = token_for(profile.id, role);
    (profile, token)
}

pub fn token_for(profile_id: DbId, role: &str) -> String {
    generate_access_token(profile_id, role, &test_config().jwt).expect("token should encode")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
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

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Lifecycle helpers
// ---------------------------------------------------------------------------

/// Create a draft project through the API and return its id.
pub async fn create_project(app: &Router, token: &str, total_value: Option<f64>) -> String {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({
            "title": "Storefront",
            "description": "An online store.",
            "deadline": "2026-12-01",
            "total_value": total_value,
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create and send the default proposal. Returns `(proposal_id, client_token)`.
pub async fn send_proposal(app: &Router, token: &str, project_id: &str) -> (String, String) {
    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/proposal"),
        serde_json::json!({}),
        token,
    )
    .await;
    assert_eq!(created.status(), axum::http::StatusCode::CREATED);
    let proposal_id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let sent = post_json_auth(
        app.clone(),
        &format!("/api/v1/proposals/{proposal_id}/send"),
        serde_json::json!({ "client_email": "c@x.com" }),
        token,
    )
    .await;
    assert_eq!(sent.status(), axum::http::StatusCode::OK);
    let client_id = body_json(sent).await["data"]["client"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    (proposal_id, client_id)
}

/// Send and accept the proposal. Returns the client token.
pub async fn accept_proposal(app: &Router, token: &str, project_id: &str) -> String {
    let (proposal_id, client_token) = send_proposal(app, token, project_id).await;
    let response = post_json(
        app.clone(),
        &format!("/api/v1/proposals/{proposal_id}/respond?token={client_token}"),
        serde_json::json!({ "decision": "accept" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    client_token
}

/// Drive the project to a signed contract. Returns `(contract_id, client_token)`.
pub async fn sign_contract(app: &Router, token: &str, project_id: &str) -> (String, String) {
    let client_token = accept_proposal(app, token, project_id).await;

    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/contract"),
        serde_json::json!({}),
        token,
    )
    .await;
    assert_eq!(created.status(), axum::http::StatusCode::CREATED);
    let contract_id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let sent = post_json_auth(
        app.clone(),
        &format!("/api/v1/contracts/{contract_id}/send"),
        serde_json::json!({}),
        token,
    )
    .await;
    assert_eq!(sent.status(), axum::http::StatusCode::OK);

    let signed = post_json(
        app.clone(),
        &format!("/api/v1/contracts/{contract_id}/sign?token={client_token}"),
        serde_json::json!({ "signer_name": "Ana Souza", "signature_data": SIGNATURE }),
    )
    .await;
    assert_eq!(signed.status(), axum::http::StatusCode::OK);
    (contract_id, client_token)
}
