//! # survey-events
//!
//! Reliable outbound event publishing for survey case-management services.
//!
//! Services emit typed domain events (case updates, address changes, UAC
//! lifecycle, fulfilment requests, …) onto a shared message bus with the
//! guarantee that an event is never silently lost: it is either delivered or
//! durably backed up for later replay.
//!
//! ## Features
//!
//! - **Typed registry**: every event kind maps to one payload shape, one bus
//!   topic and one envelope builder, fixed at startup
//! - **Backup fallback**: a transport failure persists the envelope instead
//!   of losing it; replay re-publishes it under a fresh identity
//! - **Circuit breaking**: sends can be routed through a breaker that stops
//!   hammering a failing broker
//!
//! ## Cargo features
//!
//! - `kafka`: enable the Kafka sender (requires librdkafka)
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use survey_events::{
//!     Channel, CollectionCase, EventKind, EventPublisher, InMemoryEventPersistence, Source,
//! };
//!
//! let publisher = EventPublisher::builder(sender)
//!     .persistence(Arc::new(InMemoryEventPersistence::new()))
//!     .build();
//!
//! let case = CollectionCase {
//!     id: "abc".to_string(),
//!     case_ref: "10000000010".to_string(),
//!     ..CollectionCase::default()
//! };
//!
//! let transaction_id = publisher
//!     .publish(EventKind::CaseCreated, Source::ContactCentreApi, Channel::Cc, case.into())
//!     .await?;
//! ```

pub mod backup;
pub mod breaker;
pub mod builder;
pub mod envelope;
pub mod error;
pub mod event;
pub mod payloads;
pub mod persistence;
pub mod publisher;
pub mod registry;
pub mod sender;
pub mod topic;

#[cfg(feature = "kafka")]
pub mod config;

pub use backup::EventBackup;
pub use breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, ProtectedSend, ThresholdCircuitBreaker,
};
pub use builder::EnvelopeBuilder;
pub use envelope::{Envelope, Header, SendRequest};
pub use error::{BreakerError, ConfigError, PersistenceError, PublishError, TransportError};
pub use event::{Channel, EventKind, Source};
pub use payloads::{
    Address, AddressCompact, AddressModification, AddressNotValid, AddressTypeChanged,
    CollectionCase, CollectionCaseCompact, CollectionCaseNewAddress, Contact, ContactCompact,
    EventPayload, Feedback, FulfilmentRequest, NewAddress, PayloadShape,
    QuestionnaireLinkedDetails, RespondentAuthenticatedResponse, RespondentRefusalDetails,
    SurveyLaunchedResponse, Uac,
};
pub use persistence::{EventPersistence, InMemoryEventPersistence, NoopEventPersistence};
pub use publisher::{EventPublisher, EventPublisherBuilder};
pub use registry::{Registration, Registry};
pub use sender::EventSender;
pub use topic::Topic;

#[cfg(feature = "kafka")]
pub use config::KafkaConfig;
#[cfg(feature = "kafka")]
pub use sender::KafkaEventSender;
