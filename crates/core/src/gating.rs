//! Read-model: which lifecycle actions a project currently offers.
//!
//! Flags are recomputed from document statuses on every read and never
//! persisted. Services consult the same predicates before mutating, so a
//! hidden action is also a refused one.

use serde::Serialize;

use crate::status::{ContractStatus, PaymentStatus, ProjectStatus, ProposalStatus};

/// Status view of a project and its dependent documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleSnapshot {
    pub project: ProjectStatus,
    pub proposal: Option<ProposalStatus>,
    pub contract: Option<ContractStatus>,
    pub payment: Option<PaymentStatus>,
    pub has_invoice: bool,
}

impl LifecycleSnapshot {
    /// A freshly created project with no documents.
    pub fn new(project: ProjectStatus) -> Self {
        Self {
            project,
            proposal: None,
            contract: None,
            payment: None,
            has_invoice: false,
        }
    }

    pub fn can_create_proposal(&self) -> bool {
        self.proposal.is_none() && self.project == ProjectStatus::Draft
    }

    pub fn can_create_contract(&self) -> bool {
        self.proposal == Some(ProposalStatus::Accepted) && self.contract.is_none()
    }

    /// Signed contract, work in progress, and nothing settled yet.
    pub fn can_pay(&self) -> bool {
        self.contract == Some(ContractStatus::Signed)
            && self.project == ProjectStatus::InProgress
            && self.payment != Some(PaymentStatus::Completed)
    }

    pub fn can_view_invoice(&self) -> bool {
        self.payment == Some(PaymentStatus::Completed) && self.has_invoice
    }

    pub fn can_edit_proposal(&self) -> bool {
        self.proposal.is_some_and(ProposalStatus::is_editable)
    }

    pub fn can_edit_contract(&self) -> bool {
        self.contract.is_some_and(ContractStatus::is_editable)
    }

    pub fn can_manage_tasks(&self) -> bool {
        matches!(
            self.project,
            ProjectStatus::Accepted | ProjectStatus::InProgress
        )
    }

    pub fn actions(&self) -> ProjectActions {
        ProjectActions {
            create_proposal: self.can_create_proposal(),
            edit_proposal: self.can_edit_proposal(),
            create_contract: self.can_create_contract(),
            edit_contract: self.can_edit_contract(),
            pay: self.can_pay(),
            view_invoice: self.can_view_invoice(),
            manage_tasks: self.can_manage_tasks(),
        }
    }
}

/// Serialized action flags returned with the project overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectActions {
    pub create_proposal: bool,
    pub edit_proposal: bool,
    pub create_contract: bool,
    pub edit_contract: bool,
    pub pay: bool,
    pub view_invoice: bool,
    pub manage_tasks: bool,
}
