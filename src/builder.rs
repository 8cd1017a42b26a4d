//! Per-kind envelope builders.
//!
//! Envelope shapes are not uniform across kinds: some nest the payload under
//! a `response` slot, most under a kind-named slot, and the questionnaire
//! payload slot is named `uac` on the wire. Each builder owns exactly one
//! kind's shape, in both directions, so the publisher never has to know
//! about the asymmetry.

use serde::{Deserialize, Serialize};

use crate::envelope::{open, seal, Envelope, SendRequest};
use crate::error::PublishError;
use crate::event::EventKind;
use crate::payloads::{
    AddressModification, AddressNotValid, AddressTypeChanged, CollectionCase, EventPayload,
    Feedback, FulfilmentRequest, NewAddress, QuestionnaireLinkedDetails,
    RespondentAuthenticatedResponse, RespondentRefusalDetails, SurveyLaunchedResponse, Uac,
};

/// Two-way strategy between a send request and one kind's wire envelope.
pub trait EnvelopeBuilder: Send + Sync {
    /// Wrap the request's payload into this kind's envelope shape, minting a
    /// fresh header.
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError>;

    /// Parse a previously serialized envelope of this kind's shape and
    /// recover `{payload, source, channel}`. The stored header is discarded:
    /// replay mints a new one.
    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError>;
}

fn mismatch(kind: EventKind, payload: &EventPayload) -> PublishError {
    PublishError::PayloadMismatch {
        kind,
        actual: payload.shape(),
    }
}

// Kind-specific payload slots.

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CasePayload {
    collection_case: CollectionCase,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UacPayload {
    uac: Uac,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfilmentPayload {
    fulfilment_request: FulfilmentRequest,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurveyLaunchedPayload {
    response: SurveyLaunchedResponse,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RespondentAuthenticatedPayload {
    response: RespondentAuthenticatedResponse,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefusalPayload {
    refusal: RespondentRefusalDetails,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressModifiedPayload {
    address_modification: AddressModification,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressNotValidPayload {
    invalid_address: AddressNotValid,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressTypeChangedPayload {
    address_type_change: AddressTypeChanged,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAddressPayload {
    new_address: NewAddress,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackPayload {
    feedback: Feedback,
}

// The questionnaire payload slot is named `uac` on the wire.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionnaireLinkedPayload {
    uac: QuestionnaireLinkedDetails,
}

/// Builder for the two case-lifecycle kinds, which share one shape.
pub(crate) struct CaseBuilder(pub(crate) EventKind);

impl EnvelopeBuilder for CaseBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let case = match &request.payload {
            EventPayload::CollectionCase(case) => case,
            other => return Err(mismatch(self.0, other)),
        };
        seal(
            self.0,
            request.source,
            request.channel,
            CasePayload {
                collection_case: case.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<CasePayload>(self.0, json)?;
        Ok(SendRequest {
            payload: EventPayload::CollectionCase(wire.payload.collection_case),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

/// Builder for the two UAC-lifecycle kinds, which share one shape.
pub(crate) struct UacBuilder(pub(crate) EventKind);

impl EnvelopeBuilder for UacBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let uac = match &request.payload {
            EventPayload::Uac(uac) => uac,
            other => return Err(mismatch(self.0, other)),
        };
        seal(
            self.0,
            request.source,
            request.channel,
            UacPayload { uac: uac.clone() },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<UacPayload>(self.0, json)?;
        Ok(SendRequest {
            payload: EventPayload::Uac(wire.payload.uac),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct FulfilmentRequestedBuilder;

impl EnvelopeBuilder for FulfilmentRequestedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let fulfilment = match &request.payload {
            EventPayload::FulfilmentRequest(fulfilment) => fulfilment,
            other => return Err(mismatch(EventKind::FulfilmentRequested, other)),
        };
        seal(
            EventKind::FulfilmentRequested,
            request.source,
            request.channel,
            FulfilmentPayload {
                fulfilment_request: fulfilment.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<FulfilmentPayload>(EventKind::FulfilmentRequested, json)?;
        Ok(SendRequest {
            payload: EventPayload::FulfilmentRequest(wire.payload.fulfilment_request),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct SurveyLaunchedBuilder;

impl EnvelopeBuilder for SurveyLaunchedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let response = match &request.payload {
            EventPayload::SurveyLaunched(response) => response,
            other => return Err(mismatch(EventKind::SurveyLaunched, other)),
        };
        seal(
            EventKind::SurveyLaunched,
            request.source,
            request.channel,
            SurveyLaunchedPayload {
                response: response.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<SurveyLaunchedPayload>(EventKind::SurveyLaunched, json)?;
        Ok(SendRequest {
            payload: EventPayload::SurveyLaunched(wire.payload.response),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct RespondentAuthenticatedBuilder;

impl EnvelopeBuilder for RespondentAuthenticatedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let response = match &request.payload {
            EventPayload::RespondentAuthenticated(response) => response,
            other => return Err(mismatch(EventKind::RespondentAuthenticated, other)),
        };
        seal(
            EventKind::RespondentAuthenticated,
            request.source,
            request.channel,
            RespondentAuthenticatedPayload {
                response: response.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<RespondentAuthenticatedPayload>(EventKind::RespondentAuthenticated, json)?;
        Ok(SendRequest {
            payload: EventPayload::RespondentAuthenticated(wire.payload.response),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct RefusalReceivedBuilder;

impl EnvelopeBuilder for RefusalReceivedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let refusal = match &request.payload {
            EventPayload::RespondentRefusal(refusal) => refusal,
            other => return Err(mismatch(EventKind::RefusalReceived, other)),
        };
        seal(
            EventKind::RefusalReceived,
            request.source,
            request.channel,
            RefusalPayload {
                refusal: refusal.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<RefusalPayload>(EventKind::RefusalReceived, json)?;
        Ok(SendRequest {
            payload: EventPayload::RespondentRefusal(wire.payload.refusal),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct AddressModifiedBuilder;

impl EnvelopeBuilder for AddressModifiedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let modification = match &request.payload {
            EventPayload::AddressModification(modification) => modification,
            other => return Err(mismatch(EventKind::AddressModified, other)),
        };
        seal(
            EventKind::AddressModified,
            request.source,
            request.channel,
            AddressModifiedPayload {
                address_modification: modification.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<AddressModifiedPayload>(EventKind::AddressModified, json)?;
        Ok(SendRequest {
            payload: EventPayload::AddressModification(wire.payload.address_modification),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct AddressNotValidBuilder;

impl EnvelopeBuilder for AddressNotValidBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let invalid = match &request.payload {
            EventPayload::AddressNotValid(invalid) => invalid,
            other => return Err(mismatch(EventKind::AddressNotValid, other)),
        };
        seal(
            EventKind::AddressNotValid,
            request.source,
            request.channel,
            AddressNotValidPayload {
                invalid_address: invalid.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<AddressNotValidPayload>(EventKind::AddressNotValid, json)?;
        Ok(SendRequest {
            payload: EventPayload::AddressNotValid(wire.payload.invalid_address),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct AddressTypeChangedBuilder;

impl EnvelopeBuilder for AddressTypeChangedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let change = match &request.payload {
            EventPayload::AddressTypeChanged(change) => change,
            other => return Err(mismatch(EventKind::AddressTypeChanged, other)),
        };
        seal(
            EventKind::AddressTypeChanged,
            request.source,
            request.channel,
            AddressTypeChangedPayload {
                address_type_change: change.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<AddressTypeChangedPayload>(EventKind::AddressTypeChanged, json)?;
        Ok(SendRequest {
            payload: EventPayload::AddressTypeChanged(wire.payload.address_type_change),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct NewAddressReportedBuilder;

impl EnvelopeBuilder for NewAddressReportedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let new_address = match &request.payload {
            EventPayload::NewAddress(new_address) => new_address,
            other => return Err(mismatch(EventKind::NewAddressReported, other)),
        };
        seal(
            EventKind::NewAddressReported,
            request.source,
            request.channel,
            NewAddressPayload {
                new_address: new_address.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<NewAddressPayload>(EventKind::NewAddressReported, json)?;
        Ok(SendRequest {
            payload: EventPayload::NewAddress(wire.payload.new_address),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct FeedbackBuilder;

impl EnvelopeBuilder for FeedbackBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let feedback = match &request.payload {
            EventPayload::Feedback(feedback) => feedback,
            other => return Err(mismatch(EventKind::Feedback, other)),
        };
        seal(
            EventKind::Feedback,
            request.source,
            request.channel,
            FeedbackPayload {
                feedback: feedback.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<FeedbackPayload>(EventKind::Feedback, json)?;
        Ok(SendRequest {
            payload: EventPayload::Feedback(wire.payload.feedback),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

pub(crate) struct QuestionnaireLinkedBuilder;

impl EnvelopeBuilder for QuestionnaireLinkedBuilder {
    fn build(&self, request: &SendRequest) -> Result<Envelope, PublishError> {
        let details = match &request.payload {
            EventPayload::QuestionnaireLinked(details) => details,
            other => return Err(mismatch(EventKind::QuestionnaireLinked, other)),
        };
        seal(
            EventKind::QuestionnaireLinked,
            request.source,
            request.channel,
            QuestionnaireLinkedPayload {
                uac: details.clone(),
            },
        )
    }

    fn reconstruct(&self, json: &str) -> Result<SendRequest, PublishError> {
        let wire = open::<QuestionnaireLinkedPayload>(EventKind::QuestionnaireLinked, json)?;
        Ok(SendRequest {
            payload: EventPayload::QuestionnaireLinked(wire.payload.uac),
            source: wire.event.source,
            channel: wire.event.channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Channel, Source};

    fn case_request() -> SendRequest {
        SendRequest {
            payload: EventPayload::CollectionCase(CollectionCase {
                id: "abc".to_string(),
                case_ref: "10000000010".to_string(),
                ..CollectionCase::default()
            }),
            source: Source::ContactCentreApi,
            channel: Channel::Cc,
        }
    }

    #[test]
    fn case_payload_nests_under_collection_case() {
        let builder = CaseBuilder(EventKind::CaseCreated);
        let envelope = builder.build(&case_request()).unwrap();

        let body = envelope.body();
        assert_eq!(body["event"]["type"], "CASE_CREATED");
        assert_eq!(body["payload"]["collectionCase"]["id"], "abc");
    }

    #[test]
    fn survey_launched_nests_under_response() {
        let builder = SurveyLaunchedBuilder;
        let request = SendRequest {
            payload: EventPayload::SurveyLaunched(SurveyLaunchedResponse {
                questionnaire_id: "1110000009".to_string(),
                ..SurveyLaunchedResponse::default()
            }),
            source: Source::RespondentHome,
            channel: Channel::Rh,
        };

        let envelope = builder.build(&request).unwrap();
        assert_eq!(
            envelope.body()["payload"]["response"]["questionnaireId"],
            "1110000009"
        );
    }

    #[test]
    fn questionnaire_linked_keeps_uac_slot_name() {
        let builder = QuestionnaireLinkedBuilder;
        let request = SendRequest {
            payload: EventPayload::QuestionnaireLinked(QuestionnaireLinkedDetails {
                questionnaire_id: "1110000009".to_string(),
                ..QuestionnaireLinkedDetails::default()
            }),
            source: Source::RespondentHome,
            channel: Channel::Rh,
        };

        let envelope = builder.build(&request).unwrap();
        assert_eq!(
            envelope.body()["payload"]["uac"]["questionnaireId"],
            "1110000009"
        );
    }

    #[test]
    fn wrong_payload_is_rejected() {
        let builder = UacBuilder(EventKind::UacCreated);
        let result = builder.build(&case_request());
        assert!(matches!(
            result,
            Err(PublishError::PayloadMismatch {
                kind: EventKind::UacCreated,
                ..
            })
        ));
    }

    #[test]
    fn reconstruct_discards_stored_header() {
        let builder = CaseBuilder(EventKind::CaseUpdated);
        let request = case_request();
        let envelope = builder.build(&request).unwrap();
        let json = envelope.to_json().unwrap();

        let recovered = builder.reconstruct(&json).unwrap();
        assert_eq!(recovered, request);
    }

    #[test]
    fn reconstruct_rejects_wrong_shape() {
        let builder = CaseBuilder(EventKind::CaseUpdated);
        let result = builder.reconstruct(r#"{"event": {}, "payload": {}}"#);
        assert!(matches!(
            result,
            Err(PublishError::MalformedBackup {
                kind: EventKind::CaseUpdated,
                ..
            })
        ));
    }
}
