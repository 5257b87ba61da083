//! Handlers for the `/proposals` resource.
//!
//! Owner endpoints require a staff token. `view` and `respond` are reached
//! through the client share link and authorize with its `?token=`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use studio_core::lifecycle::ProposalDecision;
use studio_core::types::DbId;
use studio_db::models::lifecycle::AnsweredProposal;
use studio_db::models::proposal::Proposal;
use studio_lifecycle::views::{ProposalView, SentProposal};

use super::{ClientTokenQuery, ContentInput};
use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /proposals/{id}/send`.
#[derive(Debug, Deserialize)]
pub struct SendProposalInput {
    pub client_email: String,
}

/// Request body for `POST /proposals/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct RespondInput {
    pub decision: ProposalDecision,
}

/// GET /api/v1/proposals/{id}
pub async fn get_by_id(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = state.proposals.get(user.user_id, id).await?;
    Ok(Json(DataResponse { data: proposal }))
}

/// PUT /api/v1/proposals/{id}
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ContentInput>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = state
        .proposals
        .update(user.user_id, id, &input.content)
        .await?;
    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/send
pub async fn send(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SendProposalInput>,
) -> AppResult<Json<DataResponse<SentProposal>>> {
    let sent = state
        .proposals
        .send(user.user_id, id, &input.client_email)
        .await?;
    Ok(Json(DataResponse { data: sent }))
}

/// GET /api/v1/proposals/{id}/view?token=
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ClientTokenQuery>,
) -> AppResult<Json<DataResponse<ProposalView>>> {
    let view = state.proposals.view(id, query.token.as_deref()).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/proposals/{id}/respond?token=
pub async fn respond(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ClientTokenQuery>,
    Json(input): Json<RespondInput>,
) -> AppResult<Json<DataResponse<AnsweredProposal>>> {
    let answered = state
        .proposals
        .respond(id, query.token.as_deref(), input.decision)
        .await?;
    Ok(Json(DataResponse { data: answered }))
}
