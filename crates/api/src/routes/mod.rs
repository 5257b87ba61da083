pub mod auth;
pub mod contact;
pub mod contract;
pub mod dashboard;
pub mod health;
pub mod payment;
pub mod project;
pub mod proposal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current profile (auth)
///
/// /projects                                        list, create (staff)
/// /projects/{id}                                   get, update, delete (draft only)
/// /projects/{id}/overview                          documents + action flags
/// /projects/{id}/proposal                          create proposal (POST)
/// /projects/{id}/contract                          create contract (POST)
/// /projects/{id}/checkout                          open checkout session (POST)
/// /projects/{project_id}/tasks                     list, create
/// /projects/{project_id}/tasks/{id}                change status, delete
///
/// /proposals/{id}                                  get, update (owner)
/// /proposals/{id}/send                             send to client (owner)
/// /proposals/{id}/view?token=                      client view (public)
/// /proposals/{id}/respond?token=                   accept / reject (client link)
///
/// /contracts/{id}                                  get, update (owner)
/// /contracts/{id}/send                             send to client (owner)
/// /contracts/{id}/view?token=                      client view (public)
/// /contracts/{id}/sign?token=                      sign (client link)
///
/// /payments/sessions/{session_id}/status           reconcile checkout (public)
///
/// /dashboard/stats                                 owner counters (staff)
///
/// /contact                                         contact form (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/proposals", proposal::router())
        .nest("/contracts", contract::router())
        .nest("/payments", payment::router())
        .nest("/dashboard", dashboard::router())
        .merge(contact::router())
}
