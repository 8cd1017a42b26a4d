//! Bus topics and the kind → topic routing table.

use std::fmt;

use crate::event::EventKind;

/// Routing key on the shared message bus.
///
/// One topic may carry several event kinds; resolution is the pure function
/// [`Topic::for_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CaseAddressUpdate,
    CaseUpdate,
    FulfilmentRequest,
    QuestionnaireUpdate,
    RespondentRefusal,
    ResponseAuthentication,
    UacUpdate,
    WebsiteFeedback,
}

impl Topic {
    /// The routing-key string as published to the bus.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseAddressUpdate => "event.case.address.update",
            Self::CaseUpdate => "event.case.update",
            Self::FulfilmentRequest => "event.fulfilment.request",
            Self::QuestionnaireUpdate => "event.questionnaire.update",
            Self::RespondentRefusal => "event.respondent.refusal",
            Self::ResponseAuthentication => "event.response.authentication",
            Self::UacUpdate => "event.uac.update",
            Self::WebsiteFeedback => "event.website.feedback",
        }
    }

    /// The set of event kinds routed through this topic.
    #[must_use]
    pub fn kinds(&self) -> &'static [EventKind] {
        match self {
            Self::CaseAddressUpdate => &[
                EventKind::NewAddressReported,
                EventKind::AddressModified,
                EventKind::AddressNotValid,
                EventKind::AddressTypeChanged,
            ],
            Self::CaseUpdate => &[EventKind::CaseUpdated, EventKind::CaseCreated],
            Self::FulfilmentRequest => &[EventKind::FulfilmentRequested],
            Self::QuestionnaireUpdate => &[EventKind::QuestionnaireLinked],
            Self::RespondentRefusal => &[EventKind::RefusalReceived],
            Self::ResponseAuthentication => &[
                EventKind::RespondentAuthenticated,
                EventKind::SurveyLaunched,
            ],
            Self::UacUpdate => &[EventKind::UacUpdated, EventKind::UacCreated],
            Self::WebsiteFeedback => &[EventKind::Feedback],
        }
    }

    /// Resolve the topic an event kind routes through.
    ///
    /// `None` for kinds with no route configured.
    #[must_use]
    pub fn for_kind(kind: EventKind) -> Option<Topic> {
        ALL.iter()
            .copied()
            .find(|topic| topic.kinds().contains(&kind))
    }
}

const ALL: &[Topic] = &[
    Topic::CaseAddressUpdate,
    Topic::CaseUpdate,
    Topic::FulfilmentRequest,
    Topic::QuestionnaireUpdate,
    Topic::RespondentRefusal,
    Topic::ResponseAuthentication,
    Topic::UacUpdate,
    Topic::WebsiteFeedback,
];

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
