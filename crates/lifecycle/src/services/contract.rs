//! Contract transitions: draft, send, client signature.

use studio_core::access::{client_link, is_valid_client_token, verify_client_token};
use studio_core::error::CoreError;
use studio_core::gating::LifecycleSnapshot;
use studio_core::lifecycle::{ensure, next_state, LifecycleEvent};
use studio_core::signature::validate_signature;
use studio_core::templates::default_contract;
use studio_core::types::DbId;
use studio_db::models::contract::{Contract, CreateContract};
use studio_db::models::lifecycle::{ContractSignature, ProjectTransition, SignedContract};
use studio_events::PlatformEvent;

use super::{content_or_default, document_context, require_content};
use crate::context::LifecycleContext;
use crate::error::LifecycleResult;
use crate::views::{ClientProjectView, ContractView, SentContract};

/// Owner and client operations on contracts.
#[derive(Clone)]
pub struct ContractService {
    ctx: LifecycleContext,
}

impl ContractService {
    pub fn new(ctx: LifecycleContext) -> Self {
        Self { ctx }
    }

    async fn contract(&self, id: DbId) -> LifecycleResult<Contract> {
        self.ctx
            .store
            .find_contract(id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Contract", id }.into())
    }

    /// Create the draft contract once the proposal has been accepted.
    pub async fn create(
        &self,
        actor: DbId,
        project_id: DbId,
        content: Option<String>,
    ) -> LifecycleResult<Contract> {
        let project = self.ctx.owned_project(project_id, actor).await?;
        let proposal = self.ctx.store.find_proposal_for_project(project.id).await?;
        let existing = self.ctx.store.find_contract_for_project(project.id).await?;

        let snapshot = LifecycleSnapshot {
            proposal: proposal.as_ref().map(|p| p.status),
            contract: existing.as_ref().map(|c| c.status),
            ..LifecycleSnapshot::new(project.status)
        };
        ensure(snapshot.can_create_contract(), || {
            if existing.is_some() {
                "Project already has a contract".to_string()
            } else {
                "A contract requires an accepted proposal".to_string()
            }
        })?;

        let doc = document_context(&self.ctx, &project).await?;
        let today = self.ctx.now().date_naive();
        let content = content_or_default(content, || default_contract(&doc, today))?;

        let contract = self
            .ctx
            .store
            .insert_contract(&CreateContract {
                project_id: project.id,
                content,
            })
            .await?;
        tracing::info!(contract_id = %contract.id, project_id = %project.id, "Contract created");
        Ok(contract)
    }

    /// Fetch a contract on a project the caller owns.
    pub async fn get(&self, actor: DbId, id: DbId) -> LifecycleResult<Contract> {
        let contract = self.contract(id).await?;
        self.ctx.owned_project(contract.project_id, actor).await?;
        Ok(contract)
    }

    pub async fn update(&self, actor: DbId, id: DbId, content: &str) -> LifecycleResult<Contract> {
        require_content(content)?;
        let contract = self.get(actor, id).await?;
        ensure(contract.status.is_editable(), || {
            format!("Cannot edit a contract in status '{}'", contract.status)
        })?;

        self.ctx
            .store
            .update_contract_content(id, content)
            .await?
            .ok_or_else(|| CoreError::Conflict("Contract is no longer a draft".into()).into())
    }

    /// Send a draft contract for signature. Its content is frozen from here on.
    pub async fn send(&self, actor: DbId, id: DbId) -> LifecycleResult<SentContract> {
        let contract = self.contract(id).await?;
        let project = self.ctx.owned_project(contract.project_id, actor).await?;
        ensure(contract.status.can_send(), || {
            format!("Cannot send a contract in status '{}'", contract.status)
        })?;
        let client_id = project.client_id.ok_or_else(|| {
            CoreError::Conflict("Project has no client to send the contract to".into())
        })?;

        let contract = self
            .ctx
            .store
            .mark_contract_sent(contract.id)
            .await?
            .ok_or_else(|| CoreError::Conflict("Contract was changed concurrently".into()))?;

        let link = client_link(
            &self.ctx.public_base_url,
            &format!("contracts/{}/sign", contract.id),
            client_id,
        );
        tracing::info!(contract_id = %contract.id, project_id = %project.id, "Contract sent");
        self.ctx.publish(
            PlatformEvent::new("contract.sent")
                .with_project(project.id)
                .with_source("contract", contract.id)
                .with_actor(actor),
        );
        Ok(SentContract { contract, link })
    }

    /// Client view of a contract through a share link.
    pub async fn view(&self, id: DbId, token: Option<&str>) -> LifecycleResult<ContractView> {
        let contract = self.contract(id).await?;
        let project = self.ctx.project(contract.project_id).await?;
        let can_sign = is_valid_client_token(project.client_id, token) && contract.status.can_sign();
        Ok(ContractView {
            project: ClientProjectView::from(&project),
            contract,
            can_sign,
        })
    }

    /// Record the client's signature and start the project.
    ///
    /// `signature_data` is the `data:image/png;base64,` URL captured on the
    /// signing pad and is stored verbatim.
    pub async fn sign(
        &self,
        id: DbId,
        token: Option<&str>,
        signer_name: &str,
        signature_data: &str,
    ) -> LifecycleResult<SignedContract> {
        let contract = self.contract(id).await?;
        let project = self.ctx.project(contract.project_id).await?;
        verify_client_token(project.client_id, token)?;
        ensure(contract.status.can_sign(), || {
            format!("Cannot sign a contract in status '{}'", contract.status)
        })?;
        let signer_name = validate_signature(signer_name, signature_data)?;
        let next = next_state(project.status, LifecycleEvent::ContractSigned)?;

        let signed = self
            .ctx
            .store
            .sign_contract(&ContractSignature {
                contract_id: contract.id,
                project_id: project.id,
                signer_name: signer_name.to_string(),
                signature_data: signature_data.to_string(),
                transition: ProjectTransition {
                    expected: project.status,
                    next,
                },
                signed_at: self.ctx.now(),
            })
            .await?
            .ok_or_else(|| CoreError::Conflict("Contract was signed concurrently".into()))?;

        tracing::info!(
            contract_id = %signed.contract.id,
            project_id = %signed.project.id,
            "Contract signed",
        );
        self.ctx.publish(
            PlatformEvent::lifecycle(LifecycleEvent::ContractSigned, signed.project.id)
                .with_source("contract", signed.contract.id)
                .with_payload(serde_json::json!({ "signer_name": signer_name })),
        );
        Ok(signed)
    }
}
