//! Handlers for tasks nested under `/projects/{project_id}/tasks`.
//!
//! Tasks can be listed at any time; changes are only accepted while the
//! project's work is active (accepted or in progress).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::error::CoreError;
use studio_core::gating::LifecycleSnapshot;
use studio_core::status::TaskStatus;
use studio_core::types::DbId;
use studio_db::models::project::Project;
use studio_db::models::task::{CreateTask, Task};
use studio_db::repositories::TaskRepo;

use super::project::find_owned;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /projects/{project_id}/tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

fn ensure_tasks_open(project: &Project) -> AppResult<()> {
    if LifecycleSnapshot::new(project.status).can_manage_tasks() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Conflict(format!(
            "Tasks cannot be changed while the project is '{}'",
            project.status
        ))))
    }
}

async fn find_task(state: &AppState, project_id: DbId, id: DbId) -> AppResult<Task> {
    match TaskRepo::find_by_id(&state.pool, id).await? {
        Some(task) if task.project_id == project_id => Ok(task),
        _ => Err(AppError::Core(CoreError::NotFound { entity: "Task", id })),
    }
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    find_owned(&state, project_id, user.user_id).await?;
    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    let project = find_owned(&state, project_id, user.user_id).await?;
    ensure_tasks_open(&project)?;

    let task = TaskRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/projects/{project_id}/tasks/{id}
pub async fn update_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTaskStatus>,
) -> AppResult<Json<Task>> {
    let project = find_owned(&state, project_id, user.user_id).await?;
    ensure_tasks_open(&project)?;
    find_task(&state, project_id, id).await?;

    let task = TaskRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{id}
pub async fn delete(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = find_owned(&state, project_id, user.user_id).await?;
    ensure_tasks_open(&project)?;
    find_task(&state, project_id, id).await?;

    if TaskRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
