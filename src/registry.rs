//! The fixed event registry: kind → payload shape, topic and builder.

use std::collections::HashMap;

use crate::builder::{
    AddressModifiedBuilder, AddressNotValidBuilder, AddressTypeChangedBuilder, CaseBuilder,
    EnvelopeBuilder, FeedbackBuilder, FulfilmentRequestedBuilder, NewAddressReportedBuilder,
    QuestionnaireLinkedBuilder, RefusalReceivedBuilder, RespondentAuthenticatedBuilder,
    SurveyLaunchedBuilder, UacBuilder,
};
use crate::error::PublishError;
use crate::event::EventKind;
use crate::payloads::{EventPayload, PayloadShape};
use crate::topic::Topic;

static CASE_CREATED: CaseBuilder = CaseBuilder(EventKind::CaseCreated);
static CASE_UPDATED: CaseBuilder = CaseBuilder(EventKind::CaseUpdated);
static UAC_CREATED: UacBuilder = UacBuilder(EventKind::UacCreated);
static UAC_UPDATED: UacBuilder = UacBuilder(EventKind::UacUpdated);
static FULFILMENT_REQUESTED: FulfilmentRequestedBuilder = FulfilmentRequestedBuilder;
static SURVEY_LAUNCHED: SurveyLaunchedBuilder = SurveyLaunchedBuilder;
static RESPONDENT_AUTHENTICATED: RespondentAuthenticatedBuilder = RespondentAuthenticatedBuilder;
static REFUSAL_RECEIVED: RefusalReceivedBuilder = RefusalReceivedBuilder;
static ADDRESS_MODIFIED: AddressModifiedBuilder = AddressModifiedBuilder;
static ADDRESS_NOT_VALID: AddressNotValidBuilder = AddressNotValidBuilder;
static ADDRESS_TYPE_CHANGED: AddressTypeChangedBuilder = AddressTypeChangedBuilder;
static NEW_ADDRESS_REPORTED: NewAddressReportedBuilder = NewAddressReportedBuilder;
static FEEDBACK: FeedbackBuilder = FeedbackBuilder;
static QUESTIONNAIRE_LINKED: QuestionnaireLinkedBuilder = QuestionnaireLinkedBuilder;

/// What the registry holds for one publishable event kind.
pub struct Registration {
    pub shape: PayloadShape,
    pub topic: Topic,
    pub builder: &'static dyn EnvelopeBuilder,
}

/// Read-only mapping from event kind to payload shape, topic and builder.
///
/// Built once from a fixed table and never mutated; safe to share across
/// tasks by reference. Construct one and pass it to the publisher; there is
/// no process-wide instance.
pub struct Registry {
    entries: HashMap<EventKind, Registration>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        let table: &[(EventKind, &'static dyn EnvelopeBuilder)] = &[
            (EventKind::CaseCreated, &CASE_CREATED),
            (EventKind::CaseUpdated, &CASE_UPDATED),
            (EventKind::UacCreated, &UAC_CREATED),
            (EventKind::UacUpdated, &UAC_UPDATED),
            (EventKind::FulfilmentRequested, &FULFILMENT_REQUESTED),
            (EventKind::SurveyLaunched, &SURVEY_LAUNCHED),
            (EventKind::RespondentAuthenticated, &RESPONDENT_AUTHENTICATED),
            (EventKind::RefusalReceived, &REFUSAL_RECEIVED),
            (EventKind::AddressModified, &ADDRESS_MODIFIED),
            (EventKind::AddressNotValid, &ADDRESS_NOT_VALID),
            (EventKind::AddressTypeChanged, &ADDRESS_TYPE_CHANGED),
            (EventKind::NewAddressReported, &NEW_ADDRESS_REPORTED),
            (EventKind::Feedback, &FEEDBACK),
            (EventKind::QuestionnaireLinked, &QUESTIONNAIRE_LINKED),
        ];

        let entries = table
            .iter()
            .map(|&(kind, builder)| {
                // Both lookups are total over the fixed table above; a gap is
                // a build-time defect, not a runtime condition.
                let shape = kind
                    .payload_shape()
                    .expect("registered event kind must have a payload shape");
                let topic =
                    Topic::for_kind(kind).expect("registered event kind must route to a topic");
                (
                    kind,
                    Registration {
                        shape,
                        topic,
                        builder,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Look up the registration for a kind.
    pub fn resolve(&self, kind: EventKind) -> Result<&Registration, PublishError> {
        self.entries
            .get(&kind)
            .ok_or(PublishError::UnregisteredKind { kind })
    }

    /// Check a payload's runtime shape against the kind's expected shape.
    ///
    /// Consults the kind directly rather than the registry row, so the error
    /// for a mismatched payload is the same whether or not the kind is
    /// registered.
    pub fn validate(&self, kind: EventKind, payload: &EventPayload) -> Result<(), PublishError> {
        match kind.payload_shape() {
            Some(expected) if expected == payload.shape() => Ok(()),
            _ => Err(PublishError::PayloadMismatch {
                kind,
                actual: payload.shape(),
            }),
        }
    }

    /// All registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::{CollectionCase, Uac};

    #[test]
    fn registered_kind_resolves() {
        let registry = Registry::new();
        let registration = registry.resolve(EventKind::CaseCreated).unwrap();
        assert_eq!(registration.shape, PayloadShape::CollectionCase);
        assert_eq!(registration.topic, Topic::CaseUpdate);
    }

    #[test]
    fn unregistered_kind_is_reported() {
        let registry = Registry::new();
        assert!(matches!(
            registry.resolve(EventKind::FulfilmentConfirmed),
            Err(PublishError::UnregisteredKind {
                kind: EventKind::FulfilmentConfirmed
            })
        ));
    }

    #[test]
    fn validate_accepts_matching_shape() {
        let registry = Registry::new();
        let payload = EventPayload::from(CollectionCase::default());
        assert!(registry.validate(EventKind::CaseUpdated, &payload).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_shape() {
        let registry = Registry::new();
        let payload = EventPayload::from(Uac::default());
        assert!(matches!(
            registry.validate(EventKind::CaseUpdated, &payload),
            Err(PublishError::PayloadMismatch {
                kind: EventKind::CaseUpdated,
                actual: PayloadShape::Uac,
            })
        ));
    }

    #[test]
    fn validate_rejects_shapeless_kinds() {
        let registry = Registry::new();
        let payload = EventPayload::from(Uac::default());
        assert!(matches!(
            registry.validate(EventKind::ResponseReceived, &payload),
            Err(PublishError::PayloadMismatch { .. })
        ));
    }

    #[test]
    fn every_registration_is_consistent() {
        let registry = Registry::new();
        assert_eq!(registry.kinds().count(), 14);
        for kind in registry.kinds() {
            let registration = registry.resolve(kind).unwrap();
            assert_eq!(Some(registration.shape), kind.payload_shape());
            assert_eq!(Some(registration.topic), Topic::for_kind(kind));
        }
    }
}
