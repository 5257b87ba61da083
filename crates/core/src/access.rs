//! Client-link authorization.
//!
//! Proposals and contracts are shared with the client through a URL that
//! carries `?token=<client_id>`. The token is the project's `client_id`
//! itself; possession of the link is the whole credential.

use crate::error::CoreError;
use crate::types::DbId;

/// Whether `token` grants client access to a project bound to `client_id`.
///
/// The token must equal the hyphenated lowercase form of `client_id`
/// exactly, as issued in share links. A project without a bound client
/// grants access to nobody, and an empty token never matches.
pub fn is_valid_client_token(client_id: Option<DbId>, token: Option<&str>) -> bool {
    match (client_id, token) {
        (Some(client_id), Some(token)) if !token.is_empty() => {
            token == client_id.hyphenated().to_string()
        }
        _ => false,
    }
}

/// Fail with [`CoreError::Forbidden`] unless the token is valid.
pub fn verify_client_token(client_id: Option<DbId>, token: Option<&str>) -> Result<(), CoreError> {
    if is_valid_client_token(client_id, token) {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Invalid or expired client link".into()))
    }
}

/// Build a client share link for a document.
///
/// `path` is the document route without leading slash, e.g.
/// `proposals/{id}/view`.
pub fn client_link(base_url: &str, path: &str, client_id: DbId) -> String {
    format!("{}/{path}?token={client_id}", base_url.trim_end_matches('/'))
}
