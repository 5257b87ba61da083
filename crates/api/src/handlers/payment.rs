//! Handlers for the `/payments` resource.

use axum::extract::{Path, State};
use axum::Json;
use studio_lifecycle::views::CheckoutStatus;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/payments/sessions/{session_id}/status
///
/// Polled by the checkout return page. Reconciles the local payment with the
/// provider and settles it the first time the session reports `paid`.
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<DataResponse<CheckoutStatus>>> {
    let status = state.payments.check_status(&session_id).await?;
    Ok(Json(DataResponse { data: status }))
}
