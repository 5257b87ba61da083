//! Studio event bus and outbound notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope published by the
//!   lifecycle services.
//! - [`EventLog`]: background subscriber writing every event to the
//!   structured log.
//! - [`delivery`]: outbound email through the Resend HTTP API.

pub mod bus;
pub mod delivery;
pub mod log;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, Mailer, OutboundEmail};
pub use log::EventLog;
