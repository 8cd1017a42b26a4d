//! Error types for event publishing, backup and replay.

use thiserror::Error;

use crate::event::EventKind;
use crate::payloads::PayloadShape;
use crate::topic::Topic;

/// Errors surfaced by the publish and replay entry points.
///
/// Every failure carries the event kind and enough context to tell the
/// taxonomy cases apart; in particular `TransportFailure` (not backed up)
/// and `BackupFailed` (both failure domains exhausted) have different
/// operational meanings.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The supplied payload does not match the shape registered for the
    /// event kind. A caller bug: never retried, never persisted.
    #[error("payload {actual} is incompatible with event kind {kind}")]
    PayloadMismatch { kind: EventKind, actual: PayloadShape },

    /// The event kind has no topic or builder registration.
    #[error("no topic or builder registered for event kind {kind}")]
    UnregisteredKind { kind: EventKind },

    /// The envelope could not be encoded for the wire.
    #[error("failed to serialize envelope for event kind {kind}: {cause}")]
    SerializationFailed { kind: EventKind, cause: String },

    /// The sender failed to deliver and no backup was made.
    #[error("failed to deliver event {kind} to topic {topic}: {cause}")]
    TransportFailure {
        kind: EventKind,
        topic: Topic,
        cause: String,
    },

    /// The circuit breaker declined the delivery without invoking the
    /// sender. Falls back the same way as a transport failure.
    #[error("circuit breaker rejected delivery of event {kind} to topic {topic}: {reason}")]
    BreakerRejected {
        kind: EventKind,
        topic: Topic,
        reason: String,
    },

    /// Delivery failed and the backup store also failed (or is not
    /// supported). The event was neither delivered nor preserved.
    #[error(
        "event {kind} could not be delivered ({transport_cause}) or backed up ({backup_cause})"
    )]
    BackupFailed {
        kind: EventKind,
        transport_cause: String,
        backup_cause: String,
    },

    /// A stored envelope could not be parsed back into a send request.
    /// Fatal for that record only.
    #[error("stored envelope for event kind {kind} could not be parsed: {cause}")]
    MalformedBackup { kind: EventKind, cause: String },
}

/// Failure reported by an [`EventSender`](crate::sender::EventSender)
/// implementation. Any sender error is a transport failure to the publisher.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

/// Failure reported by an
/// [`EventPersistence`](crate::persistence::EventPersistence) implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PersistenceError(String);

impl PersistenceError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

/// Outcome of a circuit-breaker protected call, distinguishing the breaker
/// declining to run the action from the action itself failing.
#[derive(Debug, Error)]
pub enum BreakerError {
    /// The breaker short-circuited; the sender was never invoked.
    #[error("circuit breaker rejected the call: {reason}")]
    Rejected { reason: String },

    /// The sender ran inside the breaker and failed.
    #[error(transparent)]
    Action(#[from] TransportError),
}

/// Broker configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration missing: {var}")]
    Missing { var: String },

    #[error("configuration invalid for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
