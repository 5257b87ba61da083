//! Project lifecycle state machine.
//!
//! The project status is driven exclusively by events raised from the
//! proposal, contract and payment documents. [`next_state`] is the single
//! authority on which transitions are legal; handlers call it before any
//! write and persist the returned status with a compare-and-set on the
//! status they read.
//!
//! ```text
//! draft --ProposalSent--> proposal_sent --ProposalAccepted--> accepted
//!   |                         |                                  |
//!   +--ProposalAccepted-------+                           ContractSigned
//!   |                         |                                  v
//!   +--ProposalRejected--> cancelled                        in_progress
//!                                                                |
//!                                                         PaymentCompleted
//!                                                                v
//!                                                            completed
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::{ContractStatus, PaymentStatus, ProjectStatus, ProposalStatus};

/// Events that move a project along its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    ProposalSent,
    ProposalAccepted,
    ProposalRejected,
    ContractSigned,
    PaymentCompleted,
}

impl LifecycleEvent {
    /// Dot-separated event name used for logging and the event bus.
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::ProposalSent => "proposal.sent",
            LifecycleEvent::ProposalAccepted => "proposal.accepted",
            LifecycleEvent::ProposalRejected => "proposal.rejected",
            LifecycleEvent::ContractSigned => "contract.signed",
            LifecycleEvent::PaymentCompleted => "payment.completed",
        }
    }
}

/// A transition that the state machine refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot apply {} to a project in status '{from}'", .event.name())]
pub struct TransitionRejected {
    pub from: ProjectStatus,
    pub event: LifecycleEvent,
}

impl From<TransitionRejected> for CoreError {
    fn from(err: TransitionRejected) -> Self {
        CoreError::Conflict(err.to_string())
    }
}

/// Compute the project status that results from applying `event` in
/// status `current`.
pub fn next_state(
    current: ProjectStatus,
    event: LifecycleEvent,
) -> Result<ProjectStatus, TransitionRejected> {
    use LifecycleEvent as E;
    use ProjectStatus as S;

    match (current, event) {
        (S::Draft, E::ProposalSent) => Ok(S::ProposalSent),
        (S::Draft | S::ProposalSent, E::ProposalAccepted) => Ok(S::Accepted),
        (S::Draft | S::ProposalSent, E::ProposalRejected) => Ok(S::Cancelled),
        (S::Accepted, E::ContractSigned) => Ok(S::InProgress),
        (S::InProgress, E::PaymentCompleted) => Ok(S::Completed),
        (from, event) => Err(TransitionRejected { from, event }),
    }
}

/// The client's answer to a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalDecision {
    Accept,
    Reject,
}

impl ProposalDecision {
    pub fn event(self) -> LifecycleEvent {
        match self {
            ProposalDecision::Accept => LifecycleEvent::ProposalAccepted,
            ProposalDecision::Reject => LifecycleEvent::ProposalRejected,
        }
    }

    pub fn resulting_status(self) -> ProposalStatus {
        match self {
            ProposalDecision::Accept => ProposalStatus::Accepted,
            ProposalDecision::Reject => ProposalStatus::Rejected,
        }
    }
}

impl ProposalStatus {
    /// Content may only change while the proposal is a draft.
    pub fn is_editable(self) -> bool {
        self == ProposalStatus::Draft
    }

    pub fn can_send(self) -> bool {
        self == ProposalStatus::Draft
    }

    /// A client may answer a proposal that is still open.
    pub fn can_respond(self) -> bool {
        matches!(self, ProposalStatus::Draft | ProposalStatus::Sent)
    }
}

impl ContractStatus {
    pub fn is_editable(self) -> bool {
        self == ContractStatus::Draft
    }

    pub fn can_send(self) -> bool {
        self == ContractStatus::Draft
    }

    pub fn can_sign(self) -> bool {
        self == ContractStatus::Sent
    }
}

impl PaymentStatus {
    /// Whether a provider "paid" report may still settle this payment.
    pub fn can_settle(self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Processing)
    }
}

/// Guard helper turning a document-level check into a [`CoreError::Conflict`].
pub fn ensure(allowed: bool, message: impl FnOnce() -> String) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Conflict(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const EVENTS: [LifecycleEvent; 5] = [
        LifecycleEvent::ProposalSent,
        LifecycleEvent::ProposalAccepted,
        LifecycleEvent::ProposalRejected,
        LifecycleEvent::ContractSigned,
        LifecycleEvent::PaymentCompleted,
    ];

    #[test]
    fn happy_path_reaches_completed() {
        let mut status = ProjectStatus::Draft;
        for event in [
            LifecycleEvent::ProposalSent,
            LifecycleEvent::ProposalAccepted,
            LifecycleEvent::ContractSigned,
            LifecycleEvent::PaymentCompleted,
        ] {
            status = next_state(status, event).unwrap();
        }
        assert_eq!(status, ProjectStatus::Completed);
    }

    #[test]
    fn rejection_cancels_from_draft_and_proposal_sent_only() {
        for status in ProjectStatus::ALL {
            let result = next_state(*status, LifecycleEvent::ProposalRejected);
            match status {
                ProjectStatus::Draft | ProjectStatus::ProposalSent => {
                    assert_eq!(result, Ok(ProjectStatus::Cancelled))
                }
                _ => assert!(result.is_err(), "{status} must not cancel"),
            }
        }
    }

    #[test]
    fn every_accepted_transition_is_monotonic() {
        for from in ProjectStatus::ALL {
            for event in EVENTS {
                let Ok(to) = next_state(*from, event) else {
                    continue;
                };
                match to.rank() {
                    Some(rank) => assert!(rank > from.rank().unwrap(), "{from} -> {to}"),
                    None => assert!(matches!(
                        from,
                        ProjectStatus::Draft | ProjectStatus::ProposalSent
                    )),
                }
            }
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for event in EVENTS {
            assert!(next_state(ProjectStatus::Completed, event).is_err());
            assert!(next_state(ProjectStatus::Cancelled, event).is_err());
        }
    }

    #[test]
    fn stages_cannot_be_skipped() {
        assert!(next_state(ProjectStatus::Draft, LifecycleEvent::ContractSigned).is_err());
        assert!(next_state(ProjectStatus::ProposalSent, LifecycleEvent::PaymentCompleted).is_err());
        assert!(next_state(ProjectStatus::Accepted, LifecycleEvent::PaymentCompleted).is_err());
        assert!(next_state(ProjectStatus::ProposalSent, LifecycleEvent::ProposalSent).is_err());
    }

    #[test]
    fn rejected_transition_becomes_conflict() {
        let err = next_state(ProjectStatus::Completed, LifecycleEvent::PaymentCompleted)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot apply payment.completed to a project in status 'completed'"
        );
        assert_matches!(CoreError::from(err), CoreError::Conflict(_));
    }

    #[test]
    fn document_guards() {
        assert!(ProposalStatus::Draft.can_respond());
        assert!(ProposalStatus::Sent.can_respond());
        assert!(!ProposalStatus::Accepted.can_respond());
        assert!(!ProposalStatus::Sent.can_send());
        assert!(ContractStatus::Sent.can_sign());
        assert!(!ContractStatus::Draft.can_sign());
        assert!(!ContractStatus::Signed.is_editable());
        assert!(PaymentStatus::Pending.can_settle());
        assert!(!PaymentStatus::Completed.can_settle());
    }

    #[test]
    fn decision_maps_to_event_and_status() {
        assert_eq!(
            ProposalDecision::Accept.event(),
            LifecycleEvent::ProposalAccepted
        );
        assert_eq!(
            ProposalDecision::Reject.resulting_status(),
            ProposalStatus::Rejected
        );
        let parsed: ProposalDecision = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, ProposalDecision::Reject);
    }
}
