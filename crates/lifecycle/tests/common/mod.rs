//! Shared harness for lifecycle service tests.
//!
//! Wires every service to the in-memory store and gateway, freezes the clock
//! at [`now`] and seeds one staff owner with one draft project.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockable::MockClock;
use rstest::fixture;
use studio_core::lifecycle::ProposalDecision;
use studio_core::roles::ROLE_MANAGER;
use studio_core::types::{Date, DbId};
use studio_db::models::contract::Contract;
use studio_db::models::profile::Profile;
use studio_db::models::project::Project;
use studio_events::EventBus;
use studio_lifecycle::adapters::{InMemoryLifecycleStore, InMemoryPaymentGateway};
use studio_lifecycle::services::{
    ContractService, OverviewService, PaymentService, ProposalService,
};
use studio_lifecycle::LifecycleContext;

pub const BASE_URL: &str = "https://studio.test";
pub const CLIENT_EMAIL: &str = "c@x.com";

/// 1x1 transparent PNG.
pub const SIGNATURE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Instant every service observes: 2026-03-09 14:30:15.123 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_773_066_615_123)
        .single()
        .expect("valid instant")
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

fn frozen_clock() -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(now);
    clock.expect_local().returning(|| now().into());
    clock
}

pub struct Harness {
    pub store: InMemoryLifecycleStore,
    pub gateway: InMemoryPaymentGateway,
    pub events: Arc<EventBus>,
    pub proposals: ProposalService,
    pub contracts: ContractService,
    pub payments: PaymentService,
    pub overview: OverviewService,
    pub owner: Profile,
    pub project: Project,
}

impl Harness {
    pub fn new(total_value: Option<f64>) -> Self {
        let store = InMemoryLifecycleStore::new();
        let gateway = InMemoryPaymentGateway::new();
        let events = Arc::new(EventBus::default());
        let ctx = LifecycleContext::new(
            Arc::new(store.clone()),
            Arc::new(frozen_clock()),
            Arc::clone(&events),
            BASE_URL,
        );

        let owner = store
            .seed_profile("owner@studio.test", ROLE_MANAGER)
            .expect("seed owner");
        let deadline = Date::from_ymd_opt(2026, 12, 1).expect("valid date");
        let project = store
            .seed_project(owner.id, "Storefront", deadline, total_value)
            .expect("seed project");

        Self {
            proposals: ProposalService::new(ctx.clone()),
            contracts: ContractService::new(ctx.clone()),
            payments: PaymentService::new(ctx.clone(), Arc::new(gateway.clone())),
            overview: OverviewService::new(ctx),
            store,
            gateway,
            events,
            owner,
            project,
        }
    }

    pub async fn project_now(&self) -> Project {
        use studio_lifecycle::ports::LifecycleStore;
        self.store
            .find_project(self.project.id)
            .await
            .expect("store")
            .expect("project exists")
    }

    /// Create and send the proposal. Returns `(proposal_id, client_id)`.
    pub async fn send_proposal(&self) -> (DbId, DbId) {
        let proposal = self
            .proposals
            .create(self.owner.id, self.project.id, None)
            .await
            .expect("create proposal");
        let sent = self
            .proposals
            .send(self.owner.id, proposal.id, CLIENT_EMAIL)
            .await
            .expect("send proposal");
        (proposal.id, sent.client.id)
    }

    /// Drive the project to `accepted`. Returns the client id.
    pub async fn accept_proposal(&self) -> DbId {
        let (proposal_id, client_id) = self.send_proposal().await;
        let token = client_id.to_string();
        self.proposals
            .respond(proposal_id, Some(&token), ProposalDecision::Accept)
            .await
            .expect("accept proposal");
        client_id
    }

    /// Create and send the contract after acceptance. Returns it with the
    /// client id.
    pub async fn send_contract(&self) -> (Contract, DbId) {
        let client_id = self.accept_proposal().await;
        let contract = self
            .contracts
            .create(self.owner.id, self.project.id, None)
            .await
            .expect("create contract");
        let sent = self
            .contracts
            .send(self.owner.id, contract.id)
            .await
            .expect("send contract");
        (sent.contract, client_id)
    }

    /// Drive the project to `in_progress` with a signed contract.
    pub async fn sign_contract(&self) -> Contract {
        let (contract, client_id) = self.send_contract().await;
        let token = client_id.to_string();
        self.contracts
            .sign(contract.id, Some(&token), "Ana Souza", SIGNATURE)
            .await
            .expect("sign contract")
            .contract
    }
}

#[fixture]
pub fn harness() -> Harness {
    Harness::new(Some(1234.56))
}
