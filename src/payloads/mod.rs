//! Payload records carried by domain events.
//!
//! These are plain data shapes owned by the caller until handed to the
//! publisher; field names follow the bus wire format.

pub mod address;
pub mod case;
pub mod feedback;
pub mod fulfilment;
pub mod respondent;
pub mod uac;

use std::fmt;

pub use address::{
    Address, AddressCompact, AddressModification, AddressNotValid, AddressTypeChanged, NewAddress,
};
pub use case::{
    CollectionCase, CollectionCaseCompact, CollectionCaseNewAddress, Contact, ContactCompact,
};
pub use feedback::Feedback;
pub use fulfilment::FulfilmentRequest;
pub use respondent::{
    RespondentAuthenticatedResponse, RespondentRefusalDetails, SurveyLaunchedResponse,
};
pub use uac::{QuestionnaireLinkedDetails, Uac};

/// The closed set of payloads a publish request can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    AddressModification(AddressModification),
    AddressNotValid(AddressNotValid),
    AddressTypeChanged(AddressTypeChanged),
    CollectionCase(CollectionCase),
    Feedback(Feedback),
    FulfilmentRequest(FulfilmentRequest),
    NewAddress(NewAddress),
    QuestionnaireLinked(QuestionnaireLinkedDetails),
    RespondentAuthenticated(RespondentAuthenticatedResponse),
    RespondentRefusal(RespondentRefusalDetails),
    SurveyLaunched(SurveyLaunchedResponse),
    Uac(Uac),
}

impl EventPayload {
    /// Runtime shape of this payload, compared against the shape an event
    /// kind registers.
    #[must_use]
    pub fn shape(&self) -> PayloadShape {
        match self {
            Self::AddressModification(_) => PayloadShape::AddressModification,
            Self::AddressNotValid(_) => PayloadShape::AddressNotValid,
            Self::AddressTypeChanged(_) => PayloadShape::AddressTypeChanged,
            Self::CollectionCase(_) => PayloadShape::CollectionCase,
            Self::Feedback(_) => PayloadShape::Feedback,
            Self::FulfilmentRequest(_) => PayloadShape::FulfilmentRequest,
            Self::NewAddress(_) => PayloadShape::NewAddress,
            Self::QuestionnaireLinked(_) => PayloadShape::QuestionnaireLinked,
            Self::RespondentAuthenticated(_) => PayloadShape::RespondentAuthenticated,
            Self::RespondentRefusal(_) => PayloadShape::RespondentRefusal,
            Self::SurveyLaunched(_) => PayloadShape::SurveyLaunched,
            Self::Uac(_) => PayloadShape::Uac,
        }
    }
}

macro_rules! payload_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for EventPayload {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

payload_from!(AddressModification, AddressModification);
payload_from!(AddressNotValid, AddressNotValid);
payload_from!(AddressTypeChanged, AddressTypeChanged);
payload_from!(CollectionCase, CollectionCase);
payload_from!(Feedback, Feedback);
payload_from!(FulfilmentRequest, FulfilmentRequest);
payload_from!(NewAddress, NewAddress);
payload_from!(QuestionnaireLinked, QuestionnaireLinkedDetails);
payload_from!(RespondentAuthenticated, RespondentAuthenticatedResponse);
payload_from!(RespondentRefusal, RespondentRefusalDetails);
payload_from!(SurveyLaunched, SurveyLaunchedResponse);
payload_from!(Uac, Uac);

/// Discriminant-only mirror of [`EventPayload`], used for validation and
/// error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    AddressModification,
    AddressNotValid,
    AddressTypeChanged,
    CollectionCase,
    Feedback,
    FulfilmentRequest,
    NewAddress,
    QuestionnaireLinked,
    RespondentAuthenticated,
    RespondentRefusal,
    SurveyLaunched,
    Uac,
}

impl PayloadShape {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressModification => "AddressModification",
            Self::AddressNotValid => "AddressNotValid",
            Self::AddressTypeChanged => "AddressTypeChanged",
            Self::CollectionCase => "CollectionCase",
            Self::Feedback => "Feedback",
            Self::FulfilmentRequest => "FulfilmentRequest",
            Self::NewAddress => "NewAddress",
            Self::QuestionnaireLinked => "QuestionnaireLinkedDetails",
            Self::RespondentAuthenticated => "RespondentAuthenticatedResponse",
            Self::RespondentRefusal => "RespondentRefusalDetails",
            Self::SurveyLaunched => "SurveyLaunchedResponse",
            Self::Uac => "Uac",
        }
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_tracks_variant() {
        let payload = EventPayload::from(Uac::default());
        assert_eq!(payload.shape(), PayloadShape::Uac);

        let payload = EventPayload::from(CollectionCase::default());
        assert_eq!(payload.shape(), PayloadShape::CollectionCase);
    }
}
