//! The publish orchestrator.
//!
//! Validates a request against the registry, builds the envelope, sends it
//! (optionally through a circuit breaker) and, on transport failure, falls
//! back to durable backup persistence. An event is never silently dropped:
//! every path either returns a transaction id backed by a delivered or
//! persisted envelope, or fails with a fatal error.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::backup::EventBackup;
use crate::breaker::CircuitBreaker;
use crate::envelope::{Envelope, SendRequest};
use crate::error::{BreakerError, PublishError};
use crate::event::{Channel, EventKind, Source};
use crate::payloads::EventPayload;
use crate::persistence::EventPersistence;
use crate::registry::Registry;
use crate::sender::EventSender;
use crate::topic::Topic;

/// Publishes typed domain events onto the shared bus.
///
/// Holds no per-call state; safe for unsynchronized concurrent use provided
/// its collaborators are.
pub struct EventPublisher {
    registry: Registry,
    sender: Arc<dyn EventSender>,
    persistence: Option<Arc<dyn EventPersistence>>,
    circuit_breaker: Option<Arc<dyn CircuitBreaker>>,
}

impl EventPublisher {
    /// A publisher with no backup store: a transport failure surfaces
    /// directly to the caller.
    #[must_use]
    pub fn new(sender: Arc<dyn EventSender>) -> Self {
        Self::builder(sender).build()
    }

    #[must_use]
    pub fn builder(sender: Arc<dyn EventSender>) -> EventPublisherBuilder {
        EventPublisherBuilder {
            sender,
            persistence: None,
            circuit_breaker: None,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Publish one event.
    ///
    /// On success the returned id is the transaction id minted into the
    /// envelope's header. When a backup store is configured, a transport
    /// failure followed by a successful persist also counts as success: the
    /// envelope is preserved for replay and the caller still gets the id.
    #[instrument(
        skip(self, payload),
        fields(kind = %kind, source = %source, channel = %channel)
    )]
    pub async fn publish(
        &self,
        kind: EventKind,
        source: Source,
        channel: Channel,
        payload: EventPayload,
    ) -> Result<Uuid, PublishError> {
        self.registry.validate(kind, &payload)?;
        let registration = self.registry.resolve(kind)?;

        let request = SendRequest {
            payload,
            source,
            channel,
        };
        let envelope = registration.builder.build(&request)?;
        let topic = registration.topic;

        debug!(
            topic = %topic,
            transaction_id = %envelope.transaction_id(),
            "sending event"
        );

        match self.deliver(kind, topic, &envelope).await {
            Ok(()) => {
                debug!(transaction_id = %envelope.transaction_id(), "event delivered");
                Ok(envelope.transaction_id())
            }
            Err(failure) => self.back_up(failure, &envelope).await,
        }
    }

    /// Re-publish a previously backed-up envelope.
    ///
    /// The stored envelope is reconstructed into a send request and pushed
    /// back through [`publish`](Self::publish) under its original kind, so
    /// replay runs the same validation, breaker and backup logic as a live
    /// send. A brand-new header is minted: the old transaction id is never
    /// reused. The record itself is left in the store.
    pub async fn replay(&self, backup: &EventBackup) -> Result<Uuid, PublishError> {
        let kind = backup.event_kind;
        let registration = self.registry.resolve(kind)?;
        let request = registration.builder.reconstruct(&backup.serialized_envelope)?;

        info!(
            kind = %kind,
            record_id = %backup.record_id,
            "replaying backed-up event"
        );

        self.publish(kind, request.source, request.channel, request.payload)
            .await
    }

    async fn deliver(
        &self,
        kind: EventKind,
        topic: Topic,
        envelope: &Envelope,
    ) -> Result<(), PublishError> {
        match &self.circuit_breaker {
            Some(breaker) => breaker
                .protect(self.sender.send(topic, envelope))
                .await
                .map_err(|err| match err {
                    BreakerError::Rejected { reason } => {
                        PublishError::BreakerRejected { kind, topic, reason }
                    }
                    BreakerError::Action(cause) => PublishError::TransportFailure {
                        kind,
                        topic,
                        cause: cause.to_string(),
                    },
                }),
            None => self
                .sender
                .send(topic, envelope)
                .await
                .map_err(|cause| PublishError::TransportFailure {
                    kind,
                    topic,
                    cause: cause.to_string(),
                }),
        }
    }

    /// Fallback after a failed delivery: persist the envelope if a store is
    /// configured, otherwise surface the transport failure unchanged.
    async fn back_up(
        &self,
        failure: PublishError,
        envelope: &Envelope,
    ) -> Result<Uuid, PublishError> {
        let Some(persistence) = &self.persistence else {
            return Err(failure);
        };
        let kind = envelope.kind();

        if !persistence.is_supported() {
            error!(kind = %kind, %failure, "delivery failed and event backup is not supported");
            return Err(PublishError::BackupFailed {
                kind,
                transport_cause: failure.to_string(),
                backup_cause: "event backup is not supported by this application".to_string(),
            });
        }

        warn!(
            kind = %kind,
            transaction_id = %envelope.transaction_id(),
            %failure,
            "delivery failed, backing up envelope for later replay"
        );

        match persistence.persist(kind, envelope).await {
            Ok(()) => {
                error!(
                    kind = %kind,
                    transaction_id = %envelope.transaction_id(),
                    "event backed up instead of delivered"
                );
                Ok(envelope.transaction_id())
            }
            Err(backup_cause) => Err(PublishError::BackupFailed {
                kind,
                transport_cause: failure.to_string(),
                backup_cause: backup_cause.to_string(),
            }),
        }
    }
}

/// Assembles a publisher with its optional collaborators.
pub struct EventPublisherBuilder {
    sender: Arc<dyn EventSender>,
    persistence: Option<Arc<dyn EventPersistence>>,
    circuit_breaker: Option<Arc<dyn CircuitBreaker>>,
}

impl EventPublisherBuilder {
    /// Back up envelopes to `persistence` when delivery fails.
    #[must_use]
    pub fn persistence(mut self, persistence: Arc<dyn EventPersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Route every send through `breaker`.
    #[must_use]
    pub fn circuit_breaker(mut self, breaker: Arc<dyn CircuitBreaker>) -> Self {
        self.circuit_breaker = Some(breaker);
        self
    }

    #[must_use]
    pub fn build(self) -> EventPublisher {
        EventPublisher {
            registry: Registry::new(),
            sender: self.sender,
            persistence: self.persistence,
            circuit_breaker: self.circuit_breaker,
        }
    }
}
