//! Durable backup records for envelopes that failed to deliver.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::PublishError;
use crate::event::EventKind;

/// A failed envelope as written to the durable store.
///
/// Created once when a send attempt fails, never mutated afterwards, and
/// consumed by [`replay`](crate::publisher::EventPublisher::replay). Replay
/// does not delete the record; retention belongs to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBackup {
    pub event_kind: EventKind,
    pub failure_timestamp_millis: i64,
    pub sent_timestamp_millis: Option<i64>,
    pub record_id: String,
    pub serialized_envelope: String,
}

impl EventBackup {
    /// Capture a failed envelope, keyed by its transaction id and stamped
    /// with the current time as the failure time.
    pub fn capture(envelope: &Envelope) -> Result<Self, PublishError> {
        Ok(Self {
            event_kind: envelope.kind(),
            failure_timestamp_millis: Utc::now().timestamp_millis(),
            sent_timestamp_millis: None,
            record_id: envelope.transaction_id().to_string(),
            serialized_envelope: envelope.to_json()?,
        })
    }
}
