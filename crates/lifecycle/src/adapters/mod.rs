//! Port implementations.

pub mod memory;
pub mod postgres;
pub mod stripe;

pub use memory::{InMemoryLifecycleStore, InMemoryPaymentGateway};
pub use postgres::PgLifecycleStore;
pub use stripe::StripeGateway;
