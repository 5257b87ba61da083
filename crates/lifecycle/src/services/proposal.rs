//! Proposal transitions: draft, send to a client, client response.

use studio_core::access::{client_link, is_valid_client_token, verify_client_token};
use studio_core::error::CoreError;
use studio_core::gating::LifecycleSnapshot;
use studio_core::lifecycle::{ensure, next_state, LifecycleEvent, ProposalDecision};
use studio_core::templates::default_proposal;
use studio_core::types::DbId;
use studio_db::models::lifecycle::{
    AnsweredProposal, ProjectTransition, ProposalResponse, ProposalSend,
};
use studio_db::models::proposal::{CreateProposal, Proposal};
use studio_events::PlatformEvent;
use validator::ValidateEmail;

use super::{content_or_default, document_context, require_content};
use crate::context::LifecycleContext;
use crate::error::LifecycleResult;
use crate::views::{ClientProjectView, ProposalView, SentProposal};

/// Owner and client operations on proposals.
#[derive(Clone)]
pub struct ProposalService {
    ctx: LifecycleContext,
}

impl ProposalService {
    pub fn new(ctx: LifecycleContext) -> Self {
        Self { ctx }
    }

    async fn proposal(&self, id: DbId) -> LifecycleResult<Proposal> {
        self.ctx
            .store
            .find_proposal(id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Proposal", id }.into())
    }

    /// Create the draft proposal of a draft project.
    ///
    /// Without `content` the default proposal is rendered from the project.
    pub async fn create(
        &self,
        actor: DbId,
        project_id: DbId,
        content: Option<String>,
    ) -> LifecycleResult<Proposal> {
        let project = self.ctx.owned_project(project_id, actor).await?;
        let existing = self.ctx.store.find_proposal_for_project(project.id).await?;

        let snapshot = LifecycleSnapshot {
            proposal: existing.as_ref().map(|p| p.status),
            ..LifecycleSnapshot::new(project.status)
        };
        ensure(snapshot.can_create_proposal(), || {
            if existing.is_some() {
                "Project already has a proposal".to_string()
            } else {
                format!("Cannot create a proposal for a project in status '{}'", project.status)
            }
        })?;

        let doc = document_context(&self.ctx, &project).await?;
        let content = content_or_default(content, || default_proposal(&doc))?;

        let proposal = self
            .ctx
            .store
            .insert_proposal(&CreateProposal {
                project_id: project.id,
                content,
            })
            .await?;
        tracing::info!(proposal_id = %proposal.id, project_id = %project.id, "Proposal created");
        Ok(proposal)
    }

    /// Fetch a proposal on a project the caller owns.
    pub async fn get(&self, actor: DbId, id: DbId) -> LifecycleResult<Proposal> {
        let proposal = self.proposal(id).await?;
        self.ctx.owned_project(proposal.project_id, actor).await?;
        Ok(proposal)
    }

    /// Replace the content of a draft proposal.
    pub async fn update(&self, actor: DbId, id: DbId, content: &str) -> LifecycleResult<Proposal> {
        require_content(content)?;
        let proposal = self.get(actor, id).await?;
        ensure(proposal.status.is_editable(), || {
            format!("Cannot edit a proposal in status '{}'", proposal.status)
        })?;

        self.ctx
            .store
            .update_proposal_content(id, content)
            .await?
            .ok_or_else(|| CoreError::Conflict("Proposal is no longer a draft".into()).into())
    }

    /// Send a draft proposal to a client.
    ///
    /// Resolves the client profile by email (creating a `client` profile when
    /// none exists), binds it to the project and moves the project to
    /// `proposal_sent`. Returns the client's share link.
    pub async fn send(
        &self,
        actor: DbId,
        id: DbId,
        client_email: &str,
    ) -> LifecycleResult<SentProposal> {
        let client_email = client_email.trim().to_lowercase();
        if !client_email.validate_email() {
            return Err(CoreError::Validation(format!(
                "Invalid client email '{client_email}'"
            ))
            .into());
        }

        let proposal = self.proposal(id).await?;
        let project = self.ctx.owned_project(proposal.project_id, actor).await?;
        ensure(proposal.status.can_send(), || {
            format!("Cannot send a proposal in status '{}'", proposal.status)
        })?;
        let next = next_state(project.status, LifecycleEvent::ProposalSent)?;

        let sent = self
            .ctx
            .store
            .send_proposal(&ProposalSend {
                proposal_id: proposal.id,
                project_id: project.id,
                client_email,
                transition: ProjectTransition {
                    expected: project.status,
                    next,
                },
                sent_at: self.ctx.now(),
            })
            .await?
            .ok_or_else(|| CoreError::Conflict("Proposal was changed concurrently".into()))?;

        let link = client_link(
            &self.ctx.public_base_url,
            &format!("proposals/{}/view", sent.proposal.id),
            sent.client.id,
        );
        tracing::info!(
            proposal_id = %sent.proposal.id,
            project_id = %sent.project.id,
            client_id = %sent.client.id,
            client_created = sent.client_created,
            "Proposal sent",
        );
        self.ctx.publish(
            PlatformEvent::lifecycle(LifecycleEvent::ProposalSent, sent.project.id)
                .with_source("proposal", sent.proposal.id)
                .with_actor(actor)
                .with_payload(serde_json::json!({ "client_id": sent.client.id })),
        );

        Ok(SentProposal {
            proposal: sent.proposal,
            project: sent.project,
            client: sent.client,
            client_created: sent.client_created,
            link,
        })
    }

    /// Client view of a proposal through a share link.
    pub async fn view(&self, id: DbId, token: Option<&str>) -> LifecycleResult<ProposalView> {
        let proposal = self.proposal(id).await?;
        let project = self.ctx.project(proposal.project_id).await?;
        let can_respond =
            is_valid_client_token(project.client_id, token) && proposal.status.can_respond();
        Ok(ProposalView {
            project: ClientProjectView::from(&project),
            proposal,
            can_respond,
        })
    }

    /// Record the client's accept or reject decision.
    ///
    /// Accepting moves the project to `accepted`; rejecting cancels it.
    pub async fn respond(
        &self,
        id: DbId,
        token: Option<&str>,
        decision: ProposalDecision,
    ) -> LifecycleResult<AnsweredProposal> {
        let proposal = self.proposal(id).await?;
        let project = self.ctx.project(proposal.project_id).await?;
        verify_client_token(project.client_id, token)?;
        ensure(proposal.status.can_respond(), || {
            format!("Proposal has already been answered ({})", proposal.status)
        })?;
        let event = decision.event();
        let next = next_state(project.status, event)?;

        let answered = self
            .ctx
            .store
            .answer_proposal(&ProposalResponse {
                proposal_id: proposal.id,
                project_id: project.id,
                status: decision.resulting_status(),
                transition: ProjectTransition {
                    expected: project.status,
                    next,
                },
                responded_at: self.ctx.now(),
            })
            .await?
            .ok_or_else(|| CoreError::Conflict("Proposal was answered concurrently".into()))?;

        tracing::info!(
            proposal_id = %answered.proposal.id,
            project_id = %answered.project.id,
            decision = ?decision,
            project_status = %answered.project.status,
            "Proposal answered",
        );
        self.ctx.publish(
            PlatformEvent::lifecycle(event, answered.project.id)
                .with_source("proposal", answered.proposal.id),
        );
        Ok(answered)
    }
}
