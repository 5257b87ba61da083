//! [`PaymentGateway`] backed by Stripe Checkout.

use async_trait::async_trait;
use studio_payments::{
    CheckoutRequest, CheckoutSession, SessionStatus, StripeClient, StripeConfig, StripeError,
};

use crate::ports::{GatewayError, PaymentGateway};

/// Stripe gateway. Without credentials every call fails with
/// [`GatewayError::NotConfigured`] so the server can still start.
#[derive(Clone)]
pub struct StripeGateway {
    client: Option<StripeClient>,
}

impl StripeGateway {
    pub fn new(client: StripeClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Build from `STRIPE_SECRET_KEY` / `STRIPE_API_BASE`.
    pub fn from_env() -> Result<Self, StripeError> {
        match StripeConfig::from_env() {
            Some(config) => Ok(Self::new(StripeClient::new(config)?)),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set, checkout is disabled");
                Ok(Self::unconfigured())
            }
        }
    }

    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    fn client(&self) -> Result<&StripeClient, GatewayError> {
        self.client.as_ref().ok_or(GatewayError::NotConfigured)
    }
}

impl From<StripeError> for GatewayError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Api { status, message } => GatewayError::Rejected { status, message },
            StripeError::Request(e) => GatewayError::Unreachable(e.to_string()),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        Ok(self.client()?.create_checkout_session(request).await?)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        Ok(self.client()?.retrieve_checkout_session(session_id).await?)
    }
}
