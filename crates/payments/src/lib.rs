//! Stripe Checkout client.
//!
//! Opens embedded checkout sessions and reads their payment state back.
//! Only the two endpoints the studio needs are wrapped:
//!
//! - `POST /v1/checkout/sessions`
//! - `GET /v1/checkout/sessions/{id}`

pub mod client;
pub mod config;
pub mod types;

pub use client::{StripeClient, StripeError};
pub use config::StripeConfig;
pub use types::{CheckoutRequest, CheckoutSession, SessionStatus};
