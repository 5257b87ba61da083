//! Serializable results returned by the lifecycle services.

use serde::Serialize;
use studio_core::gating::ProjectActions;
use studio_core::status::ProjectStatus;
use studio_core::types::{Date, DbId};
use studio_db::models::contract::Contract;
use studio_db::models::invoice::Invoice;
use studio_db::models::payment::Payment;
use studio_db::models::profile::Profile;
use studio_db::models::project::Project;
use studio_db::models::proposal::Proposal;

/// The project fields a client sees on a shared document page.
#[derive(Debug, Clone, Serialize)]
pub struct ClientProjectView {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub deadline: Date,
    pub total_value: Option<f64>,
    pub status: ProjectStatus,
}

impl From<&Project> for ClientProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            deadline: project.deadline,
            total_value: project.total_value,
            status: project.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalView {
    pub proposal: Proposal,
    pub project: ClientProjectView,
    /// Whether the link's token may accept or reject this proposal now.
    pub can_respond: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    pub contract: Contract,
    pub project: ClientProjectView,
    pub can_sign: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentProposal {
    pub proposal: Proposal,
    pub project: Project,
    pub client: Profile,
    pub client_created: bool,
    /// Share link for the client.
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentContract {
    pub contract: Contract,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStarted {
    pub payment: Payment,
    pub session_id: String,
    /// Secret for mounting the embedded checkout.
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStatus {
    /// Provider session status (`open`, `complete`, `expired`).
    pub status: Option<String>,
    pub payment_status: String,
    pub customer_email: Option<String>,
    pub payment: Payment,
    pub invoice: Option<Invoice>,
}

/// Everything the owner's project page needs, with the derived action flags.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub proposal: Option<Proposal>,
    pub contract: Option<Contract>,
    pub payment: Option<Payment>,
    pub invoice: Option<Invoice>,
    pub task_count: i64,
    pub actions: ProjectActions,
}
