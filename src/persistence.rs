//! Durable backup store collaborator.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::backup::EventBackup;
use crate::envelope::Envelope;
use crate::error::PersistenceError;
use crate::event::EventKind;

/// Store for envelopes that failed to deliver.
///
/// The publisher calls [`persist`](Self::persist) after a transport failure;
/// a disabled implementation can return `false` from
/// [`is_supported`](Self::is_supported) so the publisher fails fast instead
/// of attempting a persist that cannot succeed.
#[async_trait]
pub trait EventPersistence: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    async fn persist(&self, kind: EventKind, envelope: &Envelope) -> Result<(), PersistenceError>;
}

/// Persistence for applications that do not back up failed events.
pub struct NoopEventPersistence;

#[async_trait]
impl EventPersistence for NoopEventPersistence {
    fn is_supported(&self) -> bool {
        false
    }

    async fn persist(&self, _kind: EventKind, _envelope: &Envelope) -> Result<(), PersistenceError> {
        Err(PersistenceError::new(
            "application is not configured to back up events",
        ))
    }
}

/// In-process backup store, keyed by record id.
///
/// Reference implementation used by tests and local tooling; production
/// deployments supply a store backed by a durable service.
#[derive(Default)]
pub struct InMemoryEventPersistence {
    records: Mutex<HashMap<String, EventBackup>>,
}

impl InMemoryEventPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<EventBackup> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.values().cloned().collect()
    }
}

#[async_trait]
impl EventPersistence for InMemoryEventPersistence {
    async fn persist(&self, _kind: EventKind, envelope: &Envelope) -> Result<(), PersistenceError> {
        let backup = EventBackup::capture(envelope).map_err(|e| PersistenceError::new(e.to_string()))?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(backup.record_id.clone(), backup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::seal;
    use crate::event::{Channel, Source};
    use serde_json::json;

    #[tokio::test]
    async fn noop_persistence_declares_itself_unsupported() {
        let persistence = NoopEventPersistence;
        assert!(!persistence.is_supported());

        let envelope = seal(
            EventKind::Feedback,
            Source::RespondentHome,
            Channel::Rh,
            json!({}),
        )
        .unwrap();
        assert!(persistence
            .persist(EventKind::Feedback, &envelope)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn in_memory_store_keeps_one_record_per_envelope() {
        let persistence = InMemoryEventPersistence::new();
        let envelope = seal(
            EventKind::Feedback,
            Source::RespondentHome,
            Channel::Rh,
            json!({"feedback": {}}),
        )
        .unwrap();

        persistence
            .persist(EventKind::Feedback, &envelope)
            .await
            .unwrap();
        persistence
            .persist(EventKind::Feedback, &envelope)
            .await
            .unwrap();

        let records = persistence.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_id, envelope.transaction_id().to_string());
    }
}
