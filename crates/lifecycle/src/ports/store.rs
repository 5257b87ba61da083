//! Persistence port.

use async_trait::async_trait;
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
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A uniqueness guard refused the write.
    #[error("Duplicate {0}")]
    Duplicate(&'static str),

    /// The store could not be reached or its state is unusable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Lifecycle persistence contract.
///
/// The `send_proposal`, `answer_proposal`, `sign_contract` and
/// `settle_payment` methods must be atomic: either every row they touch is
/// updated or none is. Each guards its rows with a compare-and-set on the
/// current status and reports a miss as `None` or
/// [`SettlementOutcome::AlreadySettled`].
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>>;

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;

    // ---- proposals ----

    async fn find_proposal(&self, id: DbId) -> StoreResult<Option<Proposal>>;

    async fn find_proposal_for_project(&self, project_id: DbId) -> StoreResult<Option<Proposal>>;

    /// # Errors
    ///
    /// [`StoreError::Duplicate`] (or a unique-violation database error) when
    /// the project already has a proposal.
    async fn insert_proposal(&self, input: &CreateProposal) -> StoreResult<Proposal>;

    /// Replace the content of a draft proposal. `None` if it is not a draft.
    async fn update_proposal_content(&self, id: DbId, content: &str)
        -> StoreResult<Option<Proposal>>;

    async fn send_proposal(&self, input: &ProposalSend) -> StoreResult<Option<ProposalSent>>;

    async fn answer_proposal(
        &self,
        input: &ProposalResponse,
    ) -> StoreResult<Option<AnsweredProposal>>;

    // ---- contracts ----

    async fn find_contract(&self, id: DbId) -> StoreResult<Option<Contract>>;

    async fn find_contract_for_project(&self, project_id: DbId) -> StoreResult<Option<Contract>>;

    async fn insert_contract(&self, input: &CreateContract) -> StoreResult<Contract>;

    async fn update_contract_content(&self, id: DbId, content: &str)
        -> StoreResult<Option<Contract>>;

    /// Move a draft contract to `sent`. `None` if it is not a draft.
    async fn mark_contract_sent(&self, id: DbId) -> StoreResult<Option<Contract>>;

    async fn sign_contract(&self, input: &ContractSignature)
        -> StoreResult<Option<SignedContract>>;

    // ---- payments and invoices ----

    async fn insert_payment(&self, input: &CreatePayment) -> StoreResult<Payment>;

    async fn find_payment_by_session(&self, session_id: &str) -> StoreResult<Option<Payment>>;

    async fn find_latest_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>>;

    /// The earliest completed payment of the project, if it has been paid.
    async fn find_completed_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>>;

    async fn settle_payment(&self, input: &PaymentSettlement) -> StoreResult<SettlementOutcome>;

    async fn find_invoice_for_payment(&self, payment_id: DbId) -> StoreResult<Option<Invoice>>;

    // ---- tasks ----

    async fn count_tasks(&self, project_id: DbId) -> StoreResult<i64>;
}
