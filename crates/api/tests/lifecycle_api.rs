//! End-to-end HTTP tests for the project lifecycle:
//! project → proposal → contract → checkout → invoice.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    accept_proposal, body_json, create_project, delete_auth, get, get_auth, post_json,
    post_json_auth, put_json_auth, seed_staff, send_proposal, sign_contract, BASE_URL, SIGNATURE,
};
use regex::Regex;
use sqlx::PgPool;
use studio_events::Mailer;
use studio_lifecycle::adapters::InMemoryPaymentGateway;

async fn project_status(app: &axum::Router, token: &str, project_id: &str) -> String {
    let response = get_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["status"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_crud_is_limited_to_owner_and_draft(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let (_, other) = seed_staff(&pool, "other@studio.test", "admin").await;
    let app = common::build_test_app(pool);

    let project_id = create_project(&app, &owner, Some(1234.56)).await;
    assert_eq!(project_status(&app, &owner, &project_id).await, "draft");

    let listed = body_json(get_auth(app.clone(), "/api/v1/projects", &owner).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    let listed = body_json(get_auth(app.clone(), "/api/v1/projects", &other).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());

    let response = get_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        serde_json::json!({ "title": "Storefront v2" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Storefront v2");
    assert_eq!(json["description"], "An online store.");

    send_proposal(&app, &owner, &project_id).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        serde_json::json!({ "title": "Too late" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_project_can_be_deleted(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, None).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/projects/{project_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_title_is_rejected(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "title": "  ", "deadline": "2026-12-01" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sending_a_proposal_creates_and_binds_the_client(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, Some(1234.56)).await;

    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/proposal"),
        serde_json::json!({}),
        &owner,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let proposal = body_json(created).await;
    let proposal_id = proposal["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(proposal["data"]["status"], "draft");
    assert!(proposal["data"]["content"]
        .as_str()
        .unwrap()
        .contains("Total: R$ 1.234,56"));

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/proposals/{proposal_id}/send"),
        serde_json::json!({ "client_email": "C@X.com" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let sent = body_json(response).await;
    let client_id = sent["data"]["client"]["id"].as_str().unwrap();
    assert_eq!(sent["data"]["client"]["role"], "client");
    assert_eq!(sent["data"]["client"]["email"], "c@x.com");
    assert_eq!(sent["data"]["client_created"], true);
    assert_eq!(sent["data"]["project"]["client_id"], client_id);
    assert_eq!(sent["data"]["project"]["status"], "proposal_sent");
    assert_eq!(sent["data"]["proposal"]["status"], "sent");
    assert_eq!(
        sent["data"]["link"],
        format!("{BASE_URL}/proposals/{proposal_id}/view?token={client_id}")
    );

    let response = put_json_auth(
        app,
        &format!("/api/v1/proposals/{proposal_id}"),
        serde_json::json!({ "content": "Changed after sending" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_client_email_is_rejected(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, None).await;
    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/proposal"),
        serde_json::json!({ "content": "Custom proposal" }),
        &owner,
    )
    .await;
    let proposal_id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/proposals/{proposal_id}/send"),
        serde_json::json!({ "client_email": "not-an-email" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(project_status(&app, &owner, &project_id).await, "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_link_view_and_response(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, Some(500.0)).await;
    let (proposal_id, client_token) = send_proposal(&app, &owner, &project_id).await;

    let view = body_json(
        get(
            app.clone(),
            &format!("/api/v1/proposals/{proposal_id}/view?token={client_token}"),
        )
        .await,
    )
    .await;
    assert_eq!(view["data"]["can_respond"], true);
    assert_eq!(view["data"]["project"]["title"], "Storefront");

    let view = body_json(get(app.clone(), &format!("/api/v1/proposals/{proposal_id}/view")).await).await;
    assert_eq!(view["data"]["can_respond"], false);

    for bad in ["", "garbage", "00000000-0000-4000-8000-000000000000"] {
        let response = post_json(
            app.clone(),
            &format!("/api/v1/proposals/{proposal_id}/respond?token={bad}"),
            serde_json::json!({ "decision": "accept" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "token {bad:?}");
    }
    assert_eq!(project_status(&app, &owner, &project_id).await, "proposal_sent");

    let response = post_json(
        app.clone(),
        &format!("/api/v1/proposals/{proposal_id}/respond?token={client_token}"),
        serde_json::json!({ "decision": "reject" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let answered = body_json(response).await;
    assert_eq!(answered["data"]["proposal"]["status"], "rejected");
    assert_eq!(answered["data"]["project"]["status"], "cancelled");

    let response = post_json(
        app,
        &format!("/api/v1/proposals/{proposal_id}/respond?token={client_token}"),
        serde_json::json!({ "decision": "accept" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn contract_requires_accepted_proposal_and_valid_signature(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, Some(500.0)).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/contract"),
        serde_json::json!({}),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let client_token = accept_proposal(&app, &owner, &project_id).await;
    assert_eq!(project_status(&app, &owner, &project_id).await, "accepted");

    let created = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/contract"),
        serde_json::json!({}),
        &owner,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let contract = body_json(created).await;
    let contract_id = contract["data"]["id"].as_str().unwrap().to_string();
    assert!(contract["data"]["content"]
        .as_str()
        .unwrap()
        .contains("Email: c@x.com"));

    let sent = body_json(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/contracts/{contract_id}/send"),
            serde_json::json!({}),
            &owner,
        )
        .await,
    )
    .await;
    assert_eq!(
        sent["data"]["link"],
        format!("{BASE_URL}/contracts/{contract_id}/sign?token={client_token}")
    );

    let view = body_json(
        get(
            app.clone(),
            &format!("/api/v1/contracts/{contract_id}/view?token={client_token}"),
        )
        .await,
    )
    .await;
    assert_eq!(view["data"]["can_sign"], true);

    let sign_uri = format!("/api/v1/contracts/{contract_id}/sign?token={client_token}");
    let response = post_json(
        app.clone(),
        &sign_uri,
        serde_json::json!({ "signer_name": "   ", "signature_data": SIGNATURE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        &sign_uri,
        serde_json::json!({ "signer_name": "Ana Souza", "signature_data": "data:image/jpeg;base64,AAAA" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contracts/{contract_id}/sign?token="),
        serde_json::json!({ "signer_name": "Ana Souza", "signature_data": SIGNATURE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app.clone(),
        &sign_uri,
        serde_json::json!({ "signer_name": "Ana Souza", "signature_data": SIGNATURE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let signed = body_json(response).await;
    assert_eq!(signed["data"]["contract"]["status"], "signed");
    assert_eq!(signed["data"]["contract"]["signer_name"], "Ana Souza");
    assert_eq!(signed["data"]["contract"]["signature_data"], SIGNATURE);
    assert_eq!(signed["data"]["project"]["status"], "in_progress");
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkout_refuses_project_without_value(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, None).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/checkout"),
        serde_json::json!({ "contract_id": "00000000-0000-4000-8000-000000000000" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paid_checkout_completes_project_once(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let gateway = Arc::new(InMemoryPaymentGateway::new());
    let app = common::build_test_app_with(pool, gateway.clone(), Mailer::LogOnly);
    let project_id = create_project(&app, &owner, Some(1234.56)).await;
    let (contract_id, _) = sign_contract(&app, &owner, &project_id).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/checkout"),
        serde_json::json!({ "contract_id": contract_id }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let started = body_json(response).await;
    let session_id = started["data"]["session_id"].as_str().unwrap().to_string();
    assert!(started["data"]["client_secret"].is_string());
    assert_eq!(started["data"]["payment"]["status"], "pending");
    assert_eq!(started["data"]["payment"]["amount"], 1234.56);

    let requests = gateway.requests().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].unit_amount, 123_456);
    assert_eq!(requests[0].customer_email.as_deref(), Some("c@x.com"));

    let status_uri = format!("/api/v1/payments/sessions/{session_id}/status");
    let unpaid = body_json(get(app.clone(), &status_uri).await).await;
    assert_eq!(unpaid["data"]["payment_status"], "unpaid");
    assert!(unpaid["data"]["invoice"].is_null());
    assert_eq!(project_status(&app, &owner, &project_id).await, "in_progress");

    gateway.mark_paid(&session_id, "pi_123").unwrap();

    let first = body_json(get(app.clone(), &status_uri).await).await;
    assert_eq!(first["data"]["payment_status"], "paid");
    assert_eq!(first["data"]["customer_email"], "c@x.com");
    assert_eq!(first["data"]["payment"]["status"], "completed");
    assert_eq!(first["data"]["payment"]["stripe_payment_intent_id"], "pi_123");
    let invoice_number = first["data"]["invoice"]["invoice_number"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(Regex::new(r"^INV-\d+-[A-Z0-9]{8}$")
        .unwrap()
        .is_match(&invoice_number));
    assert_eq!(first["data"]["invoice"]["status"], "paid");
    assert_eq!(project_status(&app, &owner, &project_id).await, "completed");

    let second = body_json(get(app.clone(), &status_uri).await).await;
    assert_eq!(second["data"]["invoice"]["invoice_number"], invoice_number);

    let overview = body_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/projects/{project_id}/overview"),
            &owner,
        )
        .await,
    )
    .await;
    assert_eq!(overview["data"]["actions"]["view_invoice"], true);
    assert_eq!(overview["data"]["actions"]["pay"], false);
    assert_eq!(overview["data"]["invoice"]["invoice_number"], invoice_number);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/checkout"),
        serde_json::json!({ "contract_id": contract_id }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let stats = body_json(get_auth(app, "/api/v1/dashboard/stats", &owner).await).await;
    assert_eq!(stats["data"]["total_projects"], 1);
    assert_eq!(stats["data"]["completed_projects"], 1);
    assert_eq!(stats["data"]["total_revenue"], 1234.56);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_session_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/payments/sessions/cs_missing/status").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn overview_flags_follow_the_lifecycle(pool: PgPool) {
    let (_, owner) = seed_staff(&pool, "owner@studio.test", "manager").await;
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, &owner, Some(100.0)).await;
    let uri = format!("/api/v1/projects/{project_id}/overview");

    let fresh = body_json(get_auth(app.clone(), &uri, &owner).await).await;
    assert_eq!(fresh["data"]["actions"]["create_proposal"], true);
    assert_eq!(fresh["data"]["actions"]["create_contract"], false);
    assert_eq!(fresh["data"]["task_count"], 0);

    accept_proposal(&app, &owner, &project_id).await;

    let accepted = body_json(get_auth(app.clone(), &uri, &owner).await).await;
    assert_eq!(accepted["data"]["actions"]["create_proposal"], false);
    assert_eq!(accepted["data"]["actions"]["create_contract"], true);
    assert_eq!(accepted["data"]["actions"]["manage_tasks"], true);
    assert_eq!(accepted["data"]["actions"]["pay"], false);
}
