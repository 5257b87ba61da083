//! Dependencies shared by every lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::project::Project;
use studio_events::{EventBus, PlatformEvent};

use crate::error::LifecycleResult;
use crate::ports::LifecycleStore;

/// Injected collaborators. Cheap to clone.
#[derive(Clone)]
pub struct LifecycleContext {
    pub store: Arc<dyn LifecycleStore>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub events: Arc<EventBus>,
    /// Origin of client share links, e.g. `https://studio.example.com`.
    pub public_base_url: String,
}

impl LifecycleContext {
    pub fn new(
        store: Arc<dyn LifecycleStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        events: Arc<EventBus>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            events,
            public_base_url: public_base_url.into(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    pub fn publish(&self, event: PlatformEvent) {
        self.events.publish(event.at(self.now()));
    }

    /// Load a project the caller owns.
    ///
    /// Projects owned by someone else are reported as missing.
    pub async fn owned_project(&self, project_id: DbId, actor: DbId) -> LifecycleResult<Project> {
        match self.store.find_project(project_id).await? {
            Some(project) if project.created_by == actor => Ok(project),
            _ => Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }
            .into()),
        }
    }

    /// Load a project by id regardless of owner.
    pub async fn project(&self, project_id: DbId) -> LifecycleResult<Project> {
        self.store
            .find_project(project_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Project",
                    id: project_id,
                }
                .into()
            })
    }
}
