//! REST client for the Stripe Checkout Sessions API.

use std::time::Duration;

use serde::Deserialize;

use crate::config::StripeConfig;
use crate::types::{CheckoutRequest, CheckoutSession, SessionStatus};

/// HTTP timeout for a single Stripe call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors from the Stripe REST layer.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Stripe returned a non-2xx status code.
    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the Stripe API.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Result<Self, StripeError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StripeConfig) -> Self {
        Self { client, config }
    }

    /// Open an embedded checkout session.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .bearer_auth(&self.config.secret_key)
            .form(&request.form_fields())
            .send()
            .await?;

        let session: CheckoutSession = Self::parse_response(response).await?;
        tracing::debug!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }

    /// Retrieve a checkout session's current payment state.
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<SessionStatus, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/checkout/sessions/{session_id}",
                self.config.api_base
            ))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`StripeError::Api`], preferring the
    /// message from Stripe's error envelope over the raw body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StripeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or(body);
        Err(StripeError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
