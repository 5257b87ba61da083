//! Structured-log sink for platform events.

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

/// Background subscriber that writes every event to the `tracing` log,
/// giving an audit trail of lifecycle transitions.
pub struct EventLog;

impl EventLog {
    /// Run until the bus is dropped.
    pub async fn run(mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::record(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event log lagged, some events were not recorded");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event log shutting down");
                    break;
                }
            }
        }
    }

    fn record(event: &PlatformEvent) {
        tracing::info!(
            event_type = %event.event_type,
            project_id = ?event.project_id,
            source_type = ?event.source_entity_type,
            source_id = ?event.source_entity_id,
            actor_id = ?event.actor_id,
            payload = %event.payload,
            at = %event.timestamp,
            "Platform event",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn run_exits_when_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventLog::run(bus.subscribe()));
        bus.publish(PlatformEvent::new("payment.completed"));
        drop(bus);
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("event log should stop")
            .unwrap();
    }
}
