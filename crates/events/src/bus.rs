//! Fan-out of studio events to background subscribers.
//!
//! Lifecycle services publish after their writes commit; the event log (and
//! anything else that subscribes) observes them. Delivery is best effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_core::lifecycle::LifecycleEvent;
use studio_core::types::DbId;
use tokio::sync::broadcast;

/// Something that happened to a project or one of its documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"proposal.sent"`.
    pub event_type: String,

    /// Document kind (`"proposal"`, `"contract"`, `"payment"`) and its id.
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub project_id: Option<DbId>,
    /// Staff profile behind the action; `None` for share-link actions.
    pub actor_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            project_id: None,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Event for a lifecycle transition of `project_id`.
    pub fn lifecycle(event: LifecycleEvent, project_id: DbId) -> Self {
        Self::new(event.name()).with_project(project_id)
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Stamp the event with an explicit time instead of the wall clock.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

const DEFAULT_CAPACITY: usize = 256;

/// Broadcast hub shared as `Arc<EventBus>`.
///
/// ```rust
/// use studio_events::bus::{EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlatformEvent::new("project.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// A subscriber that falls more than `capacity` events behind loses the
    /// oldest ones and sees `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(dropped) => {
                tracing::trace!(event_type = %dropped.0.event_type, "No subscribers for event");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
