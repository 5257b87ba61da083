//! Request extractors for staff authentication.
//!
//! Handlers take [`rbac::RequireStaff`]; [`auth::AuthUser`] alone only
//! proves the token is valid.

pub mod auth;
pub mod rbac;
