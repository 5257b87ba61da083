//! Project lifecycle services.
//!
//! Drives a project through proposal, contract, payment and invoice. The
//! services are written against three injected ports:
//!
//! - [`ports::LifecycleStore`]: persistence, with one atomic method per
//!   multi-row transition
//! - [`ports::PaymentGateway`]: the checkout provider
//! - [`mockable::Clock`]: wall-clock time
//!
//! [`adapters`] provides PostgreSQL and Stripe implementations for
//! production and in-memory implementations for tests.

pub mod adapters;
pub mod context;
pub mod error;
pub mod ports;
pub mod services;
pub mod views;

pub use context::LifecycleContext;
pub use error::{LifecycleError, LifecycleResult};
