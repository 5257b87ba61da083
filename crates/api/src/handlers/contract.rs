//! Handlers for the `/contracts` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use studio_core::types::DbId;
use studio_db::models::contract::Contract;
use studio_db::models::lifecycle::SignedContract;
use studio_lifecycle::views::{ContractView, SentContract};

use super::{ClientTokenQuery, ContentInput};
use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contracts/{id}/sign`.
#[derive(Debug, Deserialize)]
pub struct SignInput {
    pub signer_name: String,
    /// `data:image/png;base64,...` captured on the signing pad.
    pub signature_data: String,
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let contract = state.contracts.get(user.user_id, id).await?;
    Ok(Json(DataResponse { data: contract }))
}

/// PUT /api/v1/contracts/{id}
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ContentInput>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let contract = state
        .contracts
        .update(user.user_id, id, &input.content)
        .await?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/v1/contracts/{id}/send
pub async fn send(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SentContract>>> {
    let sent = state.contracts.send(user.user_id, id).await?;
    Ok(Json(DataResponse { data: sent }))
}

/// GET /api/v1/contracts/{id}/view?token=
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ClientTokenQuery>,
) -> AppResult<Json<DataResponse<ContractView>>> {
    let view = state.contracts.view(id, query.token.as_deref()).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/contracts/{id}/sign?token=
pub async fn sign(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ClientTokenQuery>,
    Json(input): Json<SignInput>,
) -> AppResult<Json<DataResponse<SignedContract>>> {
    let signed = state
        .contracts
        .sign(
            id,
            query.token.as_deref(),
            &input.signer_name,
            &input.signature_data,
        )
        .await?;
    Ok(Json(DataResponse { data: signed }))
}
