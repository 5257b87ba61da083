use axum::routing::get;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// GET /sessions/{session_id}/status  -> session_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/sessions/{session_id}/status",
        get(payment::session_status),
    )
}
