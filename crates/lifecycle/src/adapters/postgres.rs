//! [`LifecycleStore`] backed by PostgreSQL through the `studio_db`
//! repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use studio_core::types::DbId;
use studio_db::models::contract::{Contract, CreateContract};
use studio_db::models::invoice::Invoice;
use studio_db::models::lifecycle::{
    AnsweredProposal, ContractSignature, PaymentSettlement, ProposalResponse, ProposalSend,
    ProposalSent, SettlementOutcome, SignedContract,
};
use studio_db::models::payment::{CreatePayment, Payment};
use studio_db::models::profile::Profile;
use studio_db::models::project::Project;
use studio_db::models::proposal::{CreateProposal, Proposal};
use studio_db::repositories::{
    ContractRepo, InvoiceRepo, LifecycleRepo, PaymentRepo, ProfileRepo, ProjectRepo,
    ProposalRepo, TaskRepo,
};

use crate::ports::{LifecycleStore, StoreResult};

#[derive(Clone)]
pub struct PgLifecycleStore {
    pool: PgPool,
}

impl PgLifecycleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LifecycleStore for PgLifecycleStore {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>> {
        Ok(ProfileRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    // ---- proposals ----

    async fn find_proposal(&self, id: DbId) -> StoreResult<Option<Proposal>> {
        Ok(ProposalRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_proposal_for_project(&self, project_id: DbId) -> StoreResult<Option<Proposal>> {
        Ok(ProposalRepo::find_by_project(&self.pool, project_id).await?)
    }

    async fn insert_proposal(&self, input: &CreateProposal) -> StoreResult<Proposal> {
        Ok(ProposalRepo::create(&self.pool, input).await?)
    }

    async fn update_proposal_content(
        &self,
        id: DbId,
        content: &str,
    ) -> StoreResult<Option<Proposal>> {
        Ok(ProposalRepo::update_draft_content(&self.pool, id, content).await?)
    }

    async fn send_proposal(&self, input: &ProposalSend) -> StoreResult<Option<ProposalSent>> {
        Ok(LifecycleRepo::send_proposal(&self.pool, input).await?)
    }

    async fn answer_proposal(
        &self,
        input: &ProposalResponse,
    ) -> StoreResult<Option<AnsweredProposal>> {
        Ok(LifecycleRepo::answer_proposal(&self.pool, input).await?)
    }

    // ---- contracts ----

    async fn find_contract(&self, id: DbId) -> StoreResult<Option<Contract>> {
        Ok(ContractRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_contract_for_project(&self, project_id: DbId) -> StoreResult<Option<Contract>> {
        Ok(ContractRepo::find_by_project(&self.pool, project_id).await?)
    }

    async fn insert_contract(&self, input: &CreateContract) -> StoreResult<Contract> {
        Ok(ContractRepo::create(&self.pool, input).await?)
    }

    async fn update_contract_content(
        &self,
        id: DbId,
        content: &str,
    ) -> StoreResult<Option<Contract>> {
        Ok(ContractRepo::update_draft_content(&self.pool, id, content).await?)
    }

    async fn mark_contract_sent(&self, id: DbId) -> StoreResult<Option<Contract>> {
        Ok(ContractRepo::mark_sent(&self.pool, id).await?)
    }

    async fn sign_contract(
        &self,
        input: &ContractSignature,
    ) -> StoreResult<Option<SignedContract>> {
        Ok(LifecycleRepo::sign_contract(&self.pool, input).await?)
    }

    // ---- payments and invoices ----

    async fn insert_payment(&self, input: &CreatePayment) -> StoreResult<Payment> {
        Ok(PaymentRepo::create(&self.pool, input).await?)
    }

    async fn find_payment_by_session(&self, session_id: &str) -> StoreResult<Option<Payment>> {
        Ok(PaymentRepo::find_by_session_id(&self.pool, session_id).await?)
    }

    async fn find_latest_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>> {
        Ok(PaymentRepo::find_latest_for_project(&self.pool, project_id).await?)
    }

    async fn find_completed_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>> {
        Ok(PaymentRepo::find_completed_for_project(&self.pool, project_id).await?)
    }

    async fn settle_payment(&self, input: &PaymentSettlement) -> StoreResult<SettlementOutcome> {
        Ok(LifecycleRepo::settle_payment(&self.pool, input).await?)
    }

    async fn find_invoice_for_payment(&self, payment_id: DbId) -> StoreResult<Option<Invoice>> {
        Ok(InvoiceRepo::find_by_payment(&self.pool, payment_id).await?)
    }

    // ---- tasks ----

    async fn count_tasks(&self, project_id: DbId) -> StoreResult<i64> {
        Ok(TaskRepo::count_for_project(&self.pool, project_id).await?)
    }
}
