//! # Event Publisher Adapters

use crate::events::PoolEvent;
use crate::ports::outbound::EventPublisher;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<PoolEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of published events, sorted by sequence.
    #[must_use]
    pub fn events(&self) -> Vec<PoolEvent> {
        let mut events = self.events.lock().clone();
        events.sort_by_key(PoolEvent::sequence);
        events
    }

    /// Events published for `topic`.
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Vec<PoolEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.topic() == topic)
            .collect()
    }

    /// Number of published events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, event: PoolEvent) {
        self.events.lock().push(event);
    }
}

/// Writes events to the `tracing` log as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: PoolEvent) {
        match event.to_json() {
            Ok(json) => info!(topic = event.topic(), payload = %json, "[qc-18] Event"),
            Err(e) => warn!(topic = event.topic(), error = %e, "[qc-18] Event encoding failed"),
        }
    }
}
