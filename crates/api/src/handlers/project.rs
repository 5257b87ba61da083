//! Handlers for the `/projects` resource and the lifecycle actions started
//! from a project page.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::contract::Contract;
use studio_db::models::project::{CreateProject, Project, UpdateProject};
use studio_db::models::proposal::Proposal;
use studio_db::repositories::ProjectRepo;
use studio_lifecycle::views::{CheckoutStarted, ProjectOverview};

use super::DocumentInput;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutInput {
    pub contract_id: DbId,
}

/// Load a project owned by `user_id`. Other owners' projects read as missing.
pub(crate) async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Project> {
    match ProjectRepo::find_by_id(&state.pool, id).await? {
        Some(project) if project.created_by == user_id => Ok(project),
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        })),
    }
}

fn validate_fields(title: Option<&str>, total_value: Option<f64>) -> Result<(), CoreError> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if let Some(value) = total_value {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(format!(
                "Total value must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

/// POST /api/v1/projects
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_fields(Some(&input.title), input.total_value)?;
    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(project_id = %project.id, owner = %user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    Ok(Json(find_owned(&state, id, user.user_id).await?))
}

/// PUT /api/v1/projects/{id}
///
/// Only draft projects are editable.
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_fields(input.title.as_deref(), input.total_value)?;
    find_owned(&state, id, user.user_id).await?;
    let project = ProjectRepo::update_draft(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only draft projects can be edited".into(),
            ))
        })?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, id, user.user_id).await?;
    if ProjectRepo::delete_draft(&state.pool, id).await? {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Conflict(
            "Only draft projects can be deleted".into(),
        )))
    }
}

/// GET /api/v1/projects/{id}/overview
pub async fn overview(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectOverview>>> {
    let overview = state.overview.project_overview(user.user_id, id).await?;
    Ok(Json(DataResponse { data: overview }))
}

/// POST /api/v1/projects/{id}/proposal
pub async fn create_proposal(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DocumentInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Proposal>>)> {
    let proposal = state
        .proposals
        .create(user.user_id, id, input.content)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: proposal })))
}

/// POST /api/v1/projects/{id}/contract
pub async fn create_contract(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DocumentInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Contract>>)> {
    let contract = state
        .contracts
        .create(user.user_id, id, input.content)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contract })))
}

/// POST /api/v1/projects/{id}/checkout
///
/// Opens an embedded checkout session and returns its client secret.
pub async fn create_checkout(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CheckoutInput>,
) -> AppResult<(StatusCode, Json<DataResponse<CheckoutStarted>>)> {
    let started = state
        .payments
        .create_checkout(user.user_id, id, input.contract_id)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: started })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_title_is_rejected() {
        assert_matches!(validate_fields(Some("  "), None), Err(CoreError::Validation(_)));
        assert!(validate_fields(None, None).is_ok());
    }

    #[test]
    fn total_value_must_be_non_negative() {
        assert_matches!(
            validate_fields(Some("Site"), Some(-1.0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_fields(Some("Site"), Some(f64::NAN)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_fields(Some("Site"), Some(0.0)).is_ok());
        assert!(validate_fields(Some("Site"), Some(1234.56)).is_ok());
    }
}
