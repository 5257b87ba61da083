//! Lifecycle services.

pub mod contract;
pub mod overview;
pub mod payment;
pub mod proposal;

pub use contract::ContractService;
pub use overview::OverviewService;
pub use payment::PaymentService;
pub use proposal::ProposalService;

use studio_core::error::CoreError;
use studio_core::templates::DocumentContext;
use studio_db::models::profile::Profile;
use studio_db::models::project::Project;

use crate::context::LifecycleContext;
use crate::error::LifecycleResult;

/// Template inputs drawn from a project and its bound client, if any.
pub(crate) async fn document_context(
    ctx: &LifecycleContext,
    project: &Project,
) -> LifecycleResult<DocumentContext> {
    let client: Option<Profile> = match project.client_id {
        Some(id) => ctx.store.find_profile(id).await?,
        None => None,
    };
    Ok(DocumentContext {
        title: project.title.clone(),
        description: project.description.clone(),
        deadline: Some(project.deadline),
        total_value: project.total_value,
        client_name: client.as_ref().and_then(|c| c.full_name.clone()),
        client_company: client.as_ref().and_then(|c| c.company_name.clone()),
        client_email: client.map(|c| c.email),
    })
}

/// Use the supplied document body, or render the default when it is absent.
/// A supplied body must not be blank.
pub(crate) fn content_or_default(
    content: Option<String>,
    render_default: impl FnOnce() -> String,
) -> LifecycleResult<String> {
    match content {
        Some(content) if content.trim().is_empty() => {
            Err(CoreError::Validation("Content must not be empty".into()).into())
        }
        Some(content) => Ok(content),
        None => Ok(render_default()),
    }
}

pub(crate) fn require_content(content: &str) -> LifecycleResult<()> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()).into());
    }
    Ok(())
}
