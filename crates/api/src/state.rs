use std::sync::Arc;

use mockable::DefaultClock;
use studio_events::{EventBus, Mailer};
use studio_lifecycle::adapters::PgLifecycleStore;
use studio_lifecycle::ports::PaymentGateway;
use studio_lifecycle::services::{
    ContractService, OverviewService, PaymentService, ProposalService,
};
use studio_lifecycle::LifecycleContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool, an `Arc`, or a service wrapping
/// `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub pool: studio_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub proposals: ProposalService,
    pub contracts: ContractService,
    pub payments: PaymentService,
    pub overview: OverviewService,
    /// Outbound mail for the contact form.
    pub mailer: Arc<Mailer>,
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Wire the lifecycle services to PostgreSQL, the system clock and the
    /// given payment gateway.
    pub fn new(
        pool: studio_db::DbPool,
        config: ServerConfig,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Mailer,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let ctx = LifecycleContext::new(
            Arc::new(PgLifecycleStore::new(pool.clone())),
            Arc::new(DefaultClock),
            Arc::clone(&event_bus),
            config.public_base_url.clone(),
        );

        Self {
            pool,
            config: Arc::new(config),
            proposals: ProposalService::new(ctx.clone()),
            contracts: ContractService::new(ctx.clone()),
            payments: PaymentService::new(ctx.clone(), gateway),
            overview: OverviewService::new(ctx),
            mailer: Arc::new(mailer),
            event_bus,
        }
    }
}
