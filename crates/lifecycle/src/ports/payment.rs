//! Checkout provider port.

use async_trait::async_trait;
use studio_payments::{CheckoutRequest, CheckoutSession, SessionStatus};
use thiserror::Error;

/// Errors returned by payment gateways.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Payment provider is not configured")]
    NotConfigured,

    /// The provider answered with an error status.
    #[error("Payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network failure or an unusable response.
    #[error("Payment provider unreachable: {0}")]
    Unreachable(String),
}

/// Opens checkout sessions and reports their payment state.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError>;
}
