//! Handler for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use studio_core::contact::ContactForm;
use studio_core::error::CoreError;
use studio_events::OutboundEmail;
use validator::Validate;

use crate::state::AppState;

/// Response body for `POST /contact`.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    fn new(
        status: StatusCode,
        success: bool,
        message: impl Into<String>,
    ) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success,
                message: message.into(),
            }),
        )
    }
}

/// POST /api/v1/contact
///
/// Forwards a quote request to the studio inbox with the sender as reply-to.
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    if let Err(errors) = form.validate() {
        let message = CoreError::from(errors).to_string();
        return ContactResponse::new(StatusCode::BAD_REQUEST, false, message);
    }

    let email = OutboundEmail {
        to: vec![state.mailer.contact_inbox().to_string()],
        subject: form.email_subject(),
        html: form.render_html(),
        text: form.render_text(),
        reply_to: Some(form.email.trim().to_string()),
    };

    match state.mailer.send(&email).await {
        Ok(()) => {
            tracing::info!(
                from = %form.email,
                urgent = form.is_urgent(),
                "Contact message forwarded",
            );
            ContactResponse::new(StatusCode::OK, true, "Message sent successfully")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to forward contact message");
            ContactResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                false,
                "Could not send the message, please try again later",
            )
        }
    }
}
