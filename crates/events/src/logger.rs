//! Telemetry sink for workflow events.
//!
//! [`EventLogger`] drains the event bus into the tracing log, which is the
//! operational telemetry record for this service. It runs as a background
//! task spawned at startup and stops on cancellation or when the bus is
//! dropped.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::PlatformEvent;

/// Background task that records every published event.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop until `cancel` fires or the bus closes.
    pub async fn run(mut receiver: broadcast::Receiver<PlatformEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Event logger stopping");
                    break;
                }
                result = receiver.recv() => match result {
                    Ok(event) => {
                        tracing::info!(
                            event_type = %event.event_type,
                            actor = event.actor_user_id.as_deref().unwrap_or("-"),
                            entity = event.source_entity_id.as_deref().unwrap_or("-"),
                            payload = %event.payload,
                            "Workflow event"
                        );
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Event logger lagged behind the bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, event logger shutting down");
                        break;
                    }
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn stops_on_cancellation() {
        let bus = EventBus::default();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(EventLogger::run(bus.subscribe(), cancel.clone()));

        bus.publish(PlatformEvent::new("test.event"));
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("logger should stop after cancellation")
            .expect("logger task should not panic");
    }

    #[tokio::test]
    async fn stops_when_bus_is_dropped() {
        let bus = EventBus::default();
        let receiver = bus.subscribe();
        let handle = tokio::spawn(EventLogger::run(receiver, CancellationToken::new()));

        drop(bus);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("logger should stop when the bus closes")
            .expect("logger task should not panic");
    }
}
