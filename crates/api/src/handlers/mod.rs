//! HTTP handlers, one module per resource.

pub mod auth;
pub mod contact;
pub mod contract;
pub mod dashboard;
pub mod payment;
pub mod project;
pub mod proposal;
pub mod task;

use serde::Deserialize;

/// `?token=` query carried by client share links.
#[derive(Debug, Default, Deserialize)]
pub struct ClientTokenQuery {
    pub token: Option<String>,
}

/// Optional document body for create endpoints. Omitted content renders the
/// default template.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentInput {
    pub content: Option<String>,
}

/// Body for document edits.
#[derive(Debug, Deserialize)]
pub struct ContentInput {
    pub content: String,
}
