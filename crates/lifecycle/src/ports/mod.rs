//! Ports the lifecycle services depend on.

pub mod payment;
pub mod store;

pub use payment::{GatewayError, PaymentGateway};
pub use store::{LifecycleStore, StoreError, StoreResult};
