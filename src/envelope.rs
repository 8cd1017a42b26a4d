//! Envelope and header types: the unit that crosses the transport boundary.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PublishError;
use crate::event::{Channel, EventKind, Source};
use crate::payloads::EventPayload;

/// Transport metadata attached to every envelope.
///
/// A header is minted exactly once, at envelope-build time, with a fresh
/// transaction id and the current wall-clock time. It is never carried
/// forward from a previous attempt, replay included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub source: Source,
    pub channel: Channel,
    pub date_time: DateTime<Utc>,
    pub transaction_id: Uuid,
}

impl Header {
    pub(crate) fn fresh(kind: EventKind, source: Source, channel: Channel) -> Self {
        Self {
            kind,
            source,
            channel,
            date_time: Utc::now(),
            transaction_id: Uuid::new_v4(),
        }
    }
}

/// Wire layout shared by every event kind: header under `event`, a
/// kind-specific wrapper under `payload`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireEvent<P> {
    pub event: Header,
    pub payload: P,
}

/// A built envelope: typed header plus the full wire JSON body.
///
/// The body already embeds the header; the typed copy is kept so the
/// publisher can report ids and timestamps without re-parsing.
#[derive(Debug, Clone)]
pub struct Envelope {
    header: Header,
    body: serde_json::Value,
}

impl Envelope {
    pub(crate) fn from_parts(header: Header, body: serde_json::Value) -> Self {
        Self { header, body }
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.header.kind
    }

    #[must_use]
    pub fn transaction_id(&self) -> Uuid {
        self.header.transaction_id
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.header.date_time
    }

    /// The full wire JSON, as sent to the bus and as stored in backups.
    #[must_use]
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Encode the wire JSON to a string.
    pub fn to_json(&self) -> Result<String, PublishError> {
        serde_json::to_string(&self.body).map_err(|e| PublishError::SerializationFailed {
            kind: self.header.kind,
            cause: e.to_string(),
        })
    }
}

/// What a caller hands to the publisher, and what replay reconstructs from a
/// stored envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub payload: EventPayload,
    pub source: Source,
    pub channel: Channel,
}

/// Wrap a kind-specific payload wrapper into an envelope with a fresh
/// header.
pub(crate) fn seal<P: Serialize>(
    kind: EventKind,
    source: Source,
    channel: Channel,
    payload: P,
) -> Result<Envelope, PublishError> {
    let header = Header::fresh(kind, source, channel);
    let body = serde_json::to_value(WireEvent {
        event: header.clone(),
        payload,
    })
    .map_err(|e| PublishError::SerializationFailed {
        kind,
        cause: e.to_string(),
    })?;
    Ok(Envelope::from_parts(header, body))
}

/// Parse a stored envelope of a known kind back into its typed wire layout.
pub(crate) fn open<P: DeserializeOwned>(
    kind: EventKind,
    json: &str,
) -> Result<WireEvent<P>, PublishError> {
    serde_json::from_str(json).map_err(|e| PublishError::MalformedBackup {
        kind,
        cause: e.to_string(),
    })
}
