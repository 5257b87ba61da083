//! Studio domain core.
//!
//! Pure types and rules for the project lifecycle (project, proposal,
//! contract, payment, invoice). Nothing in this crate performs I/O; the
//! `studio-lifecycle` crate drives these rules against storage and the
//! payment provider.

pub mod access;
pub mod billing;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod gating;
pub mod lifecycle;
pub mod roles;
pub mod signature;
pub mod status;
pub mod templates;
pub mod types;
