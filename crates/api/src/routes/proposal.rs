//! Route definitions for the `/proposals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::proposal;
use crate::state::AppState;

/// Routes mounted at `/proposals`.
///
/// ```text
/// GET  /{id}           -> get_by_id (owner)
/// PUT  /{id}           -> update (owner, draft only)
/// POST /{id}/send      -> send (owner)
/// GET  /{id}/view      -> view (?token=)
/// POST /{id}/respond   -> respond (?token=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(proposal::get_by_id).put(proposal::update))
        .route("/{id}/send", post(proposal::send))
        .route("/{id}/view", get(proposal::view))
        .route("/{id}/respond", post(proposal::respond))
}
