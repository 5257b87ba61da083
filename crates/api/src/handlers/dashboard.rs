//! Handlers for the `/dashboard` resource.

use axum::extract::State;
use axum::Json;
use studio_core::dashboard::DashboardStats;
use studio_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn stats(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let rows = ProjectRepo::status_values_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: DashboardStats::from_projects(rows),
    }))
}
