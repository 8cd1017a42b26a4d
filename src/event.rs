//! Event kind, source and channel discriminants.
//!
//! These are closed sets fixed at compile time: a kind's payload shape and
//! routing are never reconfigured at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payloads::PayloadShape;

/// Discriminant identifying a class of domain event.
///
/// Each kind is permanently associated with one payload shape and one
/// envelope builder. Kinds without a shape (`FulfilmentConfirmed`,
/// `ResponseReceived`, `UndeliveredMailReported`) exist in the upstream
/// catalogue but are not publishable through this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    AddressModified,
    AddressNotValid,
    AddressTypeChanged,
    CaseCreated,
    CaseUpdated,
    Feedback,
    FulfilmentConfirmed,
    FulfilmentRequested,
    NewAddressReported,
    QuestionnaireLinked,
    RefusalReceived,
    RespondentAuthenticated,
    ResponseReceived,
    SurveyLaunched,
    UacCreated,
    UacUpdated,
    UndeliveredMailReported,
}

impl EventKind {
    /// Wire name of this kind, as carried in envelope headers and backup
    /// records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressModified => "ADDRESS_MODIFIED",
            Self::AddressNotValid => "ADDRESS_NOT_VALID",
            Self::AddressTypeChanged => "ADDRESS_TYPE_CHANGED",
            Self::CaseCreated => "CASE_CREATED",
            Self::CaseUpdated => "CASE_UPDATED",
            Self::Feedback => "FEEDBACK",
            Self::FulfilmentConfirmed => "FULFILMENT_CONFIRMED",
            Self::FulfilmentRequested => "FULFILMENT_REQUESTED",
            Self::NewAddressReported => "NEW_ADDRESS_REPORTED",
            Self::QuestionnaireLinked => "QUESTIONNAIRE_LINKED",
            Self::RefusalReceived => "REFUSAL_RECEIVED",
            Self::RespondentAuthenticated => "RESPONDENT_AUTHENTICATED",
            Self::ResponseReceived => "RESPONSE_RECEIVED",
            Self::SurveyLaunched => "SURVEY_LAUNCHED",
            Self::UacCreated => "UAC_CREATED",
            Self::UacUpdated => "UAC_UPDATED",
            Self::UndeliveredMailReported => "UNDELIVERED_MAIL_REPORTED",
        }
    }

    /// The payload shape a publish request for this kind must carry.
    ///
    /// `None` for catalogue kinds that have no publishable payload; any
    /// payload offered for those is a mismatch. This is intrinsic to the
    /// kind, not a registry lookup, so validation reports the same error
    /// whatever the registry holds.
    #[must_use]
    pub fn payload_shape(&self) -> Option<PayloadShape> {
        match self {
            Self::AddressModified => Some(PayloadShape::AddressModification),
            Self::AddressNotValid => Some(PayloadShape::AddressNotValid),
            Self::AddressTypeChanged => Some(PayloadShape::AddressTypeChanged),
            Self::CaseCreated | Self::CaseUpdated => Some(PayloadShape::CollectionCase),
            Self::Feedback => Some(PayloadShape::Feedback),
            Self::FulfilmentRequested => Some(PayloadShape::FulfilmentRequest),
            Self::NewAddressReported => Some(PayloadShape::NewAddress),
            Self::QuestionnaireLinked => Some(PayloadShape::QuestionnaireLinked),
            Self::RefusalReceived => Some(PayloadShape::RespondentRefusal),
            Self::RespondentAuthenticated => Some(PayloadShape::RespondentAuthenticated),
            Self::SurveyLaunched => Some(PayloadShape::SurveyLaunched),
            Self::UacCreated | Self::UacUpdated => Some(PayloadShape::Uac),
            Self::FulfilmentConfirmed
            | Self::ResponseReceived
            | Self::UndeliveredMailReported => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream system that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    ActionExporter,
    AddressResolution,
    CaseService,
    ContactCentreApi,
    FieldworkGateway,
    NotifyGateway,
    ReceiptService,
    RespondentHome,
    SampleLoader,
}

impl Source {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionExporter => "ACTION_EXPORTER",
            Self::AddressResolution => "ADDRESS_RESOLUTION",
            Self::CaseService => "CASE_SERVICE",
            Self::ContactCentreApi => "CONTACT_CENTRE_API",
            Self::FieldworkGateway => "FIELDWORK_GATEWAY",
            Self::NotifyGateway => "NOTIFY_GATEWAY",
            Self::ReceiptService => "RECEIPT_SERVICE",
            Self::RespondentHome => "RESPONDENT_HOME",
            Self::SampleLoader => "SAMPLE_LOADER",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery channel an event was raised through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Ad,
    Ar,
    Cc,
    Eq,
    Field,
    Ppo,
    Pqrs,
    Qm,
    Rh,
    Rm,
    Ro,
}

impl Channel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ad => "AD",
            Self::Ar => "AR",
            Self::Cc => "CC",
            Self::Eq => "EQ",
            Self::Field => "FIELD",
            Self::Ppo => "PPO",
            Self::Pqrs => "PQRS",
            Self::Qm => "QM",
            Self::Rh => "RH",
            Self::Rm => "RM",
            Self::Ro => "RO",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
