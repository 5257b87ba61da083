//! Inputs and results of the multi-row lifecycle writes.
//!
//! Each write touches a document and its project in one transaction. The
//! caller decides the project's next status up front (through
//! `studio_core::lifecycle::next_state`) and passes it as a
//! [`ProjectTransition`]; the write only applies if the project still holds
//! the expected status.

use serde::Serialize;
use studio_core::status::{ProjectStatus, ProposalStatus};
use studio_core::types::{Date, DbId, Timestamp};

use super::contract::Contract;
use super::invoice::Invoice;
use super::payment::Payment;
use super::profile::Profile;
use super::project::Project;
use super::proposal::Proposal;

/// Compare-and-set on `projects.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTransition {
    pub expected: ProjectStatus,
    pub next: ProjectStatus,
}

/// Mark a draft proposal as sent and bind the project's client.
#[derive(Debug, Clone)]
pub struct ProposalSend {
    pub proposal_id: DbId,
    pub project_id: DbId,
    /// Normalized (trimmed, lowercased) client email.
    pub client_email: String,
    pub transition: ProjectTransition,
    pub sent_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct ProposalSent {
    pub proposal: Proposal,
    pub project: Project,
    pub client: Profile,
    /// Whether the client profile was created by this send.
    pub client_created: bool,
}

/// Record the client's accept/reject answer.
#[derive(Debug, Clone)]
pub struct ProposalResponse {
    pub proposal_id: DbId,
    pub project_id: DbId,
    /// `accepted` or `rejected`.
    pub status: ProposalStatus,
    pub transition: ProjectTransition,
    pub responded_at: Timestamp,
}

/// Record a client signature on a sent contract.
#[derive(Debug, Clone)]
pub struct ContractSignature {
    pub contract_id: DbId,
    pub project_id: DbId,
    pub signer_name: String,
    pub signature_data: String,
    pub transition: ProjectTransition,
    pub signed_at: Timestamp,
}

/// Settle a pending payment, issue its invoice and complete the project.
#[derive(Debug, Clone)]
pub struct PaymentSettlement {
    pub payment_id: DbId,
    pub project_id: DbId,
    pub payment_intent_id: Option<String>,
    pub paid_at: Timestamp,
    pub invoice_number: String,
    pub issue_date: Date,
    /// `None` when the project cannot move to `completed`; the payment and
    /// invoice are still recorded.
    pub transition: Option<ProjectTransition>,
}

#[derive(Debug, Clone)]
pub enum SettlementOutcome {
    Settled {
        payment: Payment,
        invoice: Invoice,
        /// Whether the project status was moved to `completed`.
        project_completed: bool,
    },
    /// Another request settled the payment first; nothing was written.
    AlreadySettled,
}

/// Documents signed in one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct SignedContract {
    pub contract: Contract,
    pub project: Project,
}

/// Documents answered in one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct AnsweredProposal {
    pub proposal: Proposal,
    pub project: Project,
}
