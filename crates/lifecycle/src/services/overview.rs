//! Owner's project page: documents plus derived action flags.

use studio_core::gating::LifecycleSnapshot;
use studio_core::types::DbId;

use crate::context::LifecycleContext;
use crate::error::LifecycleResult;
use crate::views::ProjectOverview;

#[derive(Clone)]
pub struct OverviewService {
    ctx: LifecycleContext,
}

impl OverviewService {
    pub fn new(ctx: LifecycleContext) -> Self {
        Self { ctx }
    }

    /// Load a project with its documents and the actions currently offered.
    pub async fn project_overview(
        &self,
        actor: DbId,
        project_id: DbId,
    ) -> LifecycleResult<ProjectOverview> {
        let project = self.ctx.owned_project(project_id, actor).await?;
        let store = &self.ctx.store;

        let proposal = store.find_proposal_for_project(project.id).await?;
        let contract = store.find_contract_for_project(project.id).await?;
        // A settled payment outranks any checkout opened after it.
        let payment = match store.find_completed_payment(project.id).await? {
            Some(paid) => Some(paid),
            None => store.find_latest_payment(project.id).await?,
        };
        let invoice = match &payment {
            Some(payment) => store.find_invoice_for_payment(payment.id).await?,
            None => None,
        };
        let task_count = store.count_tasks(project.id).await?;

        let snapshot = LifecycleSnapshot {
            project: project.status,
            proposal: proposal.as_ref().map(|p| p.status),
            contract: contract.as_ref().map(|c| c.status),
            payment: payment.as_ref().map(|p| p.status),
            has_invoice: invoice.is_some(),
        };

        Ok(ProjectOverview {
            actions: snapshot.actions(),
            project,
            proposal,
            contract,
            payment,
            invoice,
            task_count,
        })
    }
}
