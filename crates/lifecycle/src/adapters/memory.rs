//! In-memory port implementations for service tests and local runs.
//!
//! Multi-row writes take a single write lock and check every guard before
//! touching any row, giving the same all-or-nothing behaviour as the
//! PostgreSQL transactions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use studio_core::roles::ROLE_CLIENT;
use studio_core::status::{
    ContractStatus, InvoiceStatus, PaymentStatus, ProjectStatus, ProposalStatus,
};
use studio_core::types::{Date, DbId};
use studio_db::models::contract::{Contract, CreateContract};
use studio_db::models::invoice::Invoice;
use studio_db::models::lifecycle::{
    AnsweredProposal, ContractSignature, PaymentSettlement, ProjectTransition, ProposalResponse,
    ProposalSend, ProposalSent, SettlementOutcome, SignedContract,
};
use studio_db::models::payment::{CreatePayment, Payment};
use studio_db::models::profile::Profile;
use studio_db::models::project::Project;
use studio_db::models::proposal::{CreateProposal, Proposal};
use studio_payments::{CheckoutRequest, CheckoutSession, SessionStatus};

use crate::ports::{GatewayError, LifecycleStore, PaymentGateway, StoreError, StoreResult};

/// Thread-safe in-memory lifecycle store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLifecycleStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    profiles: HashMap<DbId, Profile>,
    projects: HashMap<DbId, Project>,
    proposals: HashMap<DbId, Proposal>,
    contracts: HashMap<DbId, Contract>,
    /// Insertion order doubles as creation order.
    payments: Vec<Payment>,
    invoices: Vec<Invoice>,
    task_counts: HashMap<DbId, i64>,
}

impl StoreState {
    fn project_matches(&self, id: DbId, transition: &ProjectTransition) -> bool {
        self.projects
            .get(&id)
            .is_some_and(|p| p.status == transition.expected)
    }

    /// Apply a transition already checked with [`Self::project_matches`].
    fn apply_transition(
        &mut self,
        id: DbId,
        transition: &ProjectTransition,
        client_id: Option<DbId>,
    ) -> Option<Project> {
        let project = self.projects.get_mut(&id)?;
        project.status = transition.next;
        if client_id.is_some() {
            project.client_id = client_id;
        }
        project.updated_at = Utc::now();
        Some(project.clone())
    }

    fn profile_by_email(&self, email: &str) -> Option<&Profile> {
        self.profiles
            .values()
            .find(|p| p.email.eq_ignore_ascii_case(email))
    }
}

fn lock_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl InMemoryLifecycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(lock_error)
    }

    /// Insert a profile with the given role.
    pub fn seed_profile(&self, email: &str, role: &str) -> StoreResult<Profile> {
        let mut state = self.write()?;
        if state.profile_by_email(email).is_some() {
            return Err(StoreError::Duplicate("profile email"));
        }
        let now = Utc::now();
        let profile = Profile {
            id: DbId::new_v4(),
            email: email.to_string(),
            full_name: None,
            company_name: None,
            role: role.to_string(),
            password_hash: None,
            created_at: now,
            updated_at: now,
        };
        state.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    /// Insert a draft project owned by `owner`.
    pub fn seed_project(
        &self,
        owner: DbId,
        title: &str,
        deadline: Date,
        total_value: Option<f64>,
    ) -> StoreResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: DbId::new_v4(),
            title: title.to_string(),
            description: String::new(),
            deadline,
            total_value,
            status: ProjectStatus::Draft,
            created_by: owner,
            client_id: None,
            created_at: now,
            updated_at: now,
        };
        self.write()?.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Overwrite a project row, e.g. to stage a status for a test.
    pub fn put_project(&self, project: Project) -> StoreResult<()> {
        self.write()?.projects.insert(project.id, project);
        Ok(())
    }

    pub fn set_task_count(&self, project_id: DbId, count: i64) -> StoreResult<()> {
        self.write()?.task_counts.insert(project_id, count);
        Ok(())
    }

    pub fn profile_by_email(&self, email: &str) -> StoreResult<Option<Profile>> {
        Ok(self.read()?.profile_by_email(email).cloned())
    }

    pub fn invoices_for_project(&self, project_id: DbId) -> StoreResult<Vec<Invoice>> {
        Ok(self
            .read()?
            .invoices
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LifecycleStore for InMemoryLifecycleStore {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>> {
        Ok(self.read()?.profiles.get(&id).cloned())
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    // ---- proposals ----

    async fn find_proposal(&self, id: DbId) -> StoreResult<Option<Proposal>> {
        Ok(self.read()?.proposals.get(&id).cloned())
    }

    async fn find_proposal_for_project(&self, project_id: DbId) -> StoreResult<Option<Proposal>> {
        Ok(self
            .read()?
            .proposals
            .values()
            .find(|p| p.project_id == project_id)
            .cloned())
    }

    async fn insert_proposal(&self, input: &CreateProposal) -> StoreResult<Proposal> {
        let mut state = self.write()?;
        if state.proposals.values().any(|p| p.project_id == input.project_id) {
            return Err(StoreError::Duplicate("proposal for project"));
        }
        let now = Utc::now();
        let proposal = Proposal {
            id: DbId::new_v4(),
            project_id: input.project_id,
            content: input.content.clone(),
            status: ProposalStatus::Draft,
            sent_at: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        };
        state.proposals.insert(proposal.id, proposal.clone());
        Ok(proposal)
    }

    async fn update_proposal_content(
        &self,
        id: DbId,
        content: &str,
    ) -> StoreResult<Option<Proposal>> {
        let mut state = self.write()?;
        Ok(state
            .proposals
            .get_mut(&id)
            .filter(|p| p.status == ProposalStatus::Draft)
            .map(|p| {
                p.content = content.to_string();
                p.updated_at = Utc::now();
                p.clone()
            }))
    }

    async fn send_proposal(&self, input: &ProposalSend) -> StoreResult<Option<ProposalSent>> {
        let mut state = self.write()?;
        let draft = state
            .proposals
            .get(&input.proposal_id)
            .is_some_and(|p| p.status == ProposalStatus::Draft);
        if !draft || !state.project_matches(input.project_id, &input.transition) {
            return Ok(None);
        }

        let now = Utc::now();
        let (client, client_created) = match state.profile_by_email(&input.client_email) {
            Some(existing) => (existing.clone(), false),
            None => {
                let profile = Profile {
                    id: DbId::new_v4(),
                    email: input.client_email.clone(),
                    full_name: None,
                    company_name: None,
                    role: ROLE_CLIENT.to_string(),
                    password_hash: None,
                    created_at: now,
                    updated_at: now,
                };
                state.profiles.insert(profile.id, profile.clone());
                (profile, true)
            }
        };

        let Some(proposal) = state.proposals.get_mut(&input.proposal_id) else {
            return Ok(None);
        };
        proposal.status = ProposalStatus::Sent;
        proposal.sent_at = Some(input.sent_at);
        proposal.updated_at = now;
        let proposal = proposal.clone();

        let Some(project) =
            state.apply_transition(input.project_id, &input.transition, Some(client.id))
        else {
            return Ok(None);
        };
        Ok(Some(ProposalSent {
            proposal,
            project,
            client,
            client_created,
        }))
    }

    async fn answer_proposal(
        &self,
        input: &ProposalResponse,
    ) -> StoreResult<Option<AnsweredProposal>> {
        let mut state = self.write()?;
        let open = state
            .proposals
            .get(&input.proposal_id)
            .is_some_and(|p| p.status.can_respond());
        if !open || !state.project_matches(input.project_id, &input.transition) {
            return Ok(None);
        }

        let Some(proposal) = state.proposals.get_mut(&input.proposal_id) else {
            return Ok(None);
        };
        proposal.status = input.status;
        proposal.responded_at = Some(input.responded_at);
        proposal.updated_at = Utc::now();
        let proposal = proposal.clone();

        let Some(project) = state.apply_transition(input.project_id, &input.transition, None)
        else {
            return Ok(None);
        };
        Ok(Some(AnsweredProposal { proposal, project }))
    }

    // ---- contracts ----

    async fn find_contract(&self, id: DbId) -> StoreResult<Option<Contract>> {
        Ok(self.read()?.contracts.get(&id).cloned())
    }

    async fn find_contract_for_project(&self, project_id: DbId) -> StoreResult<Option<Contract>> {
        Ok(self
            .read()?
            .contracts
            .values()
            .find(|c| c.project_id == project_id)
            .cloned())
    }

    async fn insert_contract(&self, input: &CreateContract) -> StoreResult<Contract> {
        let mut state = self.write()?;
        if state.contracts.values().any(|c| c.project_id == input.project_id) {
            return Err(StoreError::Duplicate("contract for project"));
        }
        let now = Utc::now();
        let contract = Contract {
            id: DbId::new_v4(),
            project_id: input.project_id,
            content: input.content.clone(),
            status: ContractStatus::Draft,
            signed_at: None,
            signature_data: None,
            signer_name: None,
            created_at: now,
            updated_at: now,
        };
        state.contracts.insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn update_contract_content(
        &self,
        id: DbId,
        content: &str,
    ) -> StoreResult<Option<Contract>> {
        let mut state = self.write()?;
        Ok(state
            .contracts
            .get_mut(&id)
            .filter(|c| c.status == ContractStatus::Draft)
            .map(|c| {
                c.content = content.to_string();
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn mark_contract_sent(&self, id: DbId) -> StoreResult<Option<Contract>> {
        let mut state = self.write()?;
        Ok(state
            .contracts
            .get_mut(&id)
            .filter(|c| c.status == ContractStatus::Draft)
            .map(|c| {
                c.status = ContractStatus::Sent;
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn sign_contract(
        &self,
        input: &ContractSignature,
    ) -> StoreResult<Option<SignedContract>> {
        let mut state = self.write()?;
        let sent = state
            .contracts
            .get(&input.contract_id)
            .is_some_and(|c| c.status == ContractStatus::Sent);
        if !sent || !state.project_matches(input.project_id, &input.transition) {
            return Ok(None);
        }

        let Some(contract) = state.contracts.get_mut(&input.contract_id) else {
            return Ok(None);
        };
        contract.status = ContractStatus::Signed;
        contract.signed_at = Some(input.signed_at);
        contract.signer_name = Some(input.signer_name.clone());
        contract.signature_data = Some(input.signature_data.clone());
        contract.updated_at = Utc::now();
        let contract = contract.clone();

        let Some(project) = state.apply_transition(input.project_id, &input.transition, None)
        else {
            return Ok(None);
        };
        Ok(Some(SignedContract { contract, project }))
    }

    // ---- payments and invoices ----

    async fn insert_payment(&self, input: &CreatePayment) -> StoreResult<Payment> {
        let mut state = self.write()?;
        if state
            .payments
            .iter()
            .any(|p| p.stripe_session_id.as_deref() == Some(input.stripe_session_id.as_str()))
        {
            return Err(StoreError::Duplicate("payment session id"));
        }
        let now = Utc::now();
        let payment = Payment {
            id: DbId::new_v4(),
            project_id: input.project_id,
            contract_id: input.contract_id,
            amount: input.amount,
            status: PaymentStatus::Pending,
            stripe_session_id: Some(input.stripe_session_id.clone()),
            stripe_payment_intent_id: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        state.payments.push(payment.clone());
        Ok(payment)
    }

    async fn find_payment_by_session(&self, session_id: &str) -> StoreResult<Option<Payment>> {
        Ok(self
            .read()?
            .payments
            .iter()
            .find(|p| p.stripe_session_id.as_deref() == Some(session_id))
            .cloned())
    }

    async fn find_latest_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>> {
        Ok(self
            .read()?
            .payments
            .iter()
            .rev()
            .find(|p| p.project_id == project_id)
            .cloned())
    }

    async fn find_completed_payment(&self, project_id: DbId) -> StoreResult<Option<Payment>> {
        Ok(self
            .read()?
            .payments
            .iter()
            .filter(|p| p.project_id == project_id && p.status == PaymentStatus::Completed)
            .min_by_key(|p| p.paid_at)
            .cloned())
    }

    async fn settle_payment(&self, input: &PaymentSettlement) -> StoreResult<SettlementOutcome> {
        let mut state = self.write()?;
        let Some(index) = state
            .payments
            .iter()
            .position(|p| p.id == input.payment_id && p.status.can_settle())
        else {
            return Ok(SettlementOutcome::AlreadySettled);
        };
        if state
            .invoices
            .iter()
            .any(|i| i.invoice_number == input.invoice_number)
        {
            return Err(StoreError::Duplicate("invoice number"));
        }

        let now = Utc::now();
        let payment = &mut state.payments[index];
        payment.status = PaymentStatus::Completed;
        payment.paid_at = Some(input.paid_at);
        if input.payment_intent_id.is_some() {
            payment.stripe_payment_intent_id = input.payment_intent_id.clone();
        }
        payment.updated_at = now;
        let payment = payment.clone();

        let invoice = Invoice {
            id: DbId::new_v4(),
            project_id: input.project_id,
            payment_id: payment.id,
            invoice_number: input.invoice_number.clone(),
            amount: payment.amount,
            issue_date: input.issue_date,
            due_date: input.issue_date,
            pdf_url: None,
            status: InvoiceStatus::Paid,
            created_at: now,
            updated_at: now,
        };
        state.invoices.push(invoice.clone());

        let project_completed = match &input.transition {
            Some(transition) if state.project_matches(input.project_id, transition) => state
                .apply_transition(input.project_id, transition, None)
                .is_some(),
            Some(transition) => {
                tracing::warn!(
                    project_id = %input.project_id,
                    payment_id = %payment.id,
                    expected = %transition.expected,
                    "Project status changed before settlement, left as is",
                );
                false
            }
            None => false,
        };

        Ok(SettlementOutcome::Settled {
            payment,
            invoice,
            project_completed,
        })
    }

    async fn find_invoice_for_payment(&self, payment_id: DbId) -> StoreResult<Option<Invoice>> {
        Ok(self
            .read()?
            .invoices
            .iter()
            .find(|i| i.payment_id == payment_id)
            .cloned())
    }

    // ---- tasks ----

    async fn count_tasks(&self, project_id: DbId) -> StoreResult<i64> {
        Ok(self
            .read()?
            .task_counts
            .get(&project_id)
            .copied()
            .unwrap_or(0))
    }
}

// ---------------------------------------------------------------------------
// Payment gateway
// ---------------------------------------------------------------------------

/// Scripted checkout provider.
///
/// Sessions open as `unpaid`; tests flip them with [`Self::mark_paid`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<GatewayState>>,
}

#[derive(Debug, Default)]
struct GatewayState {
    sessions: HashMap<String, SessionStatus>,
    requests: Vec<CheckoutRequest>,
    retrievals: usize,
}

fn gateway_lock_error(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Unreachable(err.to_string())
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the session as paid from now on.
    pub fn mark_paid(&self, session_id: &str, payment_intent: &str) -> Result<(), GatewayError> {
        let mut state = self.state.write().map_err(gateway_lock_error)?;
        let session = state.sessions.get_mut(session_id).ok_or_else(|| {
            GatewayError::Rejected {
                status: 404,
                message: format!("No such checkout.session: '{session_id}'"),
            }
        })?;
        session.status = Some("complete".into());
        session.payment_status = "paid".into();
        session.payment_intent = Some(payment_intent.to_string());
        Ok(())
    }

    /// Checkout requests received so far, oldest first.
    pub fn requests(&self) -> Result<Vec<CheckoutRequest>, GatewayError> {
        Ok(self
            .state
            .read()
            .map_err(gateway_lock_error)?
            .requests
            .clone())
    }

    /// Number of session lookups served.
    pub fn retrievals(&self) -> Result<usize, GatewayError> {
        Ok(self.state.read().map_err(gateway_lock_error)?.retrievals)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let mut state = self.state.write().map_err(gateway_lock_error)?;
        let id = format!("cs_test_{}", state.requests.len() + 1);
        state.sessions.insert(
            id.clone(),
            SessionStatus {
                id: id.clone(),
                status: Some("open".into()),
                payment_status: "unpaid".into(),
                payment_intent: None,
                customer_email: request.customer_email.clone(),
                customer_details: None,
            },
        );
        state.requests.push(request.clone());
        Ok(CheckoutSession {
            client_secret: Some(format!("{id}_secret")),
            id,
        })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        let mut state = self.state.write().map_err(gateway_lock_error)?;
        state.retrievals += 1;
        state
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| GatewayError::Rejected {
                status: 404,
                message: format!("No such checkout.session: '{session_id}'"),
            })
    }
}
