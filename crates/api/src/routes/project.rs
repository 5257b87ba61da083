//! Route definitions for the `/projects` resource.
//!
//! Also nests the project's tasks under `/projects/{project_id}/tasks`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/overview                     -> overview
/// POST   /{id}/proposal                     -> create_proposal
/// POST   /{id}/contract                     -> create_contract
/// POST   /{id}/checkout                     -> create_checkout
///
/// GET    /{project_id}/tasks                -> list_by_project
/// POST   /{project_id}/tasks                -> create
/// PATCH  /{project_id}/tasks/{id}           -> update_status
/// DELETE /{project_id}/tasks/{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(task::list_by_project).post(task::create))
        .route("/{id}", patch(task::update_status).delete(task::delete));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/overview", get(project::overview))
        .route("/{id}/proposal", post(project::create_proposal))
        .route("/{id}/contract", post(project::create_contract))
        .route("/{id}/checkout", post(project::create_checkout))
        .nest("/{project_id}/tasks", task_routes)
}
