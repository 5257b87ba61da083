//! Contract e-signature payload checks.
//!
//! The signing surface rasterizes the client's strokes and submits the
//! bitmap as a PNG data URL. The payload is stored verbatim; no stroke data
//! is kept.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Required prefix of a submitted signature image.
pub const SIGNATURE_DATA_PREFIX: &str = "data:image/png;base64,";

/// Upper bound on the stored data URL (about 1.5 MB of PNG).
pub const MAX_SIGNATURE_DATA_LEN: usize = 2 * 1024 * 1024;

/// Upper bound on the typed signer name.
pub const MAX_SIGNER_NAME_LEN: usize = 200;

fn base64_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("static base64 pattern is valid")
    })
}

/// Validate the signer's typed name and the rendered signature image.
///
/// Returns the trimmed signer name.
pub fn validate_signature<'a>(signer_name: &'a str, signature_data: &str) -> Result<&'a str, CoreError> {
    let name = signer_name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Signer full name is required".into(),
        ));
    }
    if name.chars().count() > MAX_SIGNER_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Signer name must be at most {MAX_SIGNER_NAME_LEN} characters"
        )));
    }

    let Some(payload) = signature_data.strip_prefix(SIGNATURE_DATA_PREFIX) else {
        return Err(CoreError::Validation(
            "Signature must be a PNG data URL".into(),
        ));
    };
    if payload.is_empty() {
        return Err(CoreError::Validation("Signature image is empty".into()));
    }
    if signature_data.len() > MAX_SIGNATURE_DATA_LEN {
        return Err(CoreError::Validation("Signature image is too large".into()));
    }
    if payload.len() % 4 != 0 || !base64_pattern().is_match(payload) {
        return Err(CoreError::Validation(
            "Signature image is not valid base64".into(),
        ));
    }
    Ok(name)
}
