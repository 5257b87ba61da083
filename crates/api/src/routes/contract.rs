//! Route definitions for the `/contracts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contract;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// GET  /{id}           -> get_by_id (owner)
/// PUT  /{id}           -> update (owner, draft only)
/// POST /{id}/send      -> send (owner)
/// GET  /{id}/view      -> view (?token=)
/// POST /{id}/sign      -> sign (?token=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(contract::get_by_id).put(contract::update))
        .route("/{id}/send", post(contract::send))
        .route("/{id}/view", get(contract::view))
        .route("/{id}/sign", post(contract::sign))
}
