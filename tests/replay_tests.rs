//! Scenario tests for backup capture and replay.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use survey_events::{
    Address, AddressCompact, AddressModification, AddressNotValid, AddressTypeChanged, Channel,
    CollectionCase, CollectionCaseCompact, CollectionCaseNewAddress, Envelope, EventBackup,
    EventKind, EventPayload, EventPublisher, EventSender, Feedback, FulfilmentRequest, Header,
    InMemoryEventPersistence, NewAddress, PublishError, QuestionnaireLinkedDetails, Registry,
    RespondentAuthenticatedResponse, RespondentRefusalDetails, SendRequest, Source,
    SurveyLaunchedResponse, Topic, TransportError, Uac,
};

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<Header>>,
}

impl RecordingSender {
    fn headers(&self) -> Vec<Header> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSender for RecordingSender {
    async fn send(&self, _topic: Topic, envelope: &Envelope) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(envelope.header().clone());
        Ok(())
    }
}

#[derive(Default)]
struct FailingSender {
    attempts: AtomicUsize,
}

#[async_trait]
impl EventSender for FailingSender {
    async fn send(&self, _topic: Topic, _envelope: &Envelope) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::new("broker unavailable"))
    }
}

fn sample_address() -> AddressCompact {
    AddressCompact {
        address_line1: "1 High Street".to_string(),
        town_name: "Exeter".to_string(),
        postcode: "EX1 1AA".to_string(),
        region: "E".to_string(),
        ..AddressCompact::default()
    }
}

fn sample_case() -> CollectionCase {
    CollectionCase {
        id: "bbd55984-0dbf-4499-bfa7-0aa4228700e9".to_string(),
        case_ref: "10000000010".to_string(),
        case_type: "HH".to_string(),
        survey: "CENSUS".to_string(),
        collection_exercise_id: "n66de4dc-3c3b-11e9-b210-d663bd873d93".to_string(),
        address: Address {
            lines: sample_address(),
            ..Address::default()
        },
        ..CollectionCase::default()
    }
}

/// A distinctive payload of the shape the kind expects.
fn sample_payload(kind: EventKind) -> EventPayload {
    match kind {
        EventKind::CaseCreated | EventKind::CaseUpdated => sample_case().into(),
        EventKind::UacCreated | EventKind::UacUpdated => Uac {
            uac_hash: "6b9d56e0d1a5a257d0d0a2e2c7d8c3b1".to_string(),
            active: Some("true".to_string()),
            questionnaire_id: "1110000009".to_string(),
            case_id: "bbd55984-0dbf-4499-bfa7-0aa4228700e9".to_string(),
            form_type: Some("H".to_string()),
        }
        .into(),
        EventKind::FulfilmentRequested => FulfilmentRequest {
            fulfilment_code: "P_OR_H1".to_string(),
            case_id: "id-123".to_string(),
            ..FulfilmentRequest::default()
        }
        .into(),
        EventKind::SurveyLaunched => SurveyLaunchedResponse {
            questionnaire_id: "1110000009".to_string(),
            case_id: Uuid::new_v4(),
            agent_id: Some("cc_000351".to_string()),
        }
        .into(),
        EventKind::RespondentAuthenticated => RespondentAuthenticatedResponse {
            questionnaire_id: "1110000009".to_string(),
            case_id: Uuid::new_v4(),
        }
        .into(),
        EventKind::RefusalReceived => RespondentRefusalDetails {
            refusal_type: "HARD_REFUSAL".to_string(),
            agent_id: Some("cc_000351".to_string()),
            is_householder: true,
            collection_case: CollectionCaseCompact {
                id: Uuid::new_v4(),
                ..CollectionCaseCompact::default()
            },
            address: sample_address(),
            ..RespondentRefusalDetails::default()
        }
        .into(),
        EventKind::AddressModified => AddressModification {
            collection_case: CollectionCaseCompact {
                id: Uuid::new_v4(),
                ..CollectionCaseCompact::default()
            },
            original_address: sample_address(),
            new_address: AddressCompact {
                address_line1: "2 High Street".to_string(),
                ..sample_address()
            },
        }
        .into(),
        EventKind::AddressNotValid => AddressNotValid {
            collection_case: CollectionCaseCompact {
                id: Uuid::new_v4(),
                ..CollectionCaseCompact::default()
            },
            reason: "DEMOLISHED".to_string(),
            notes: Some("building knocked down in 2020".to_string()),
        }
        .into(),
        EventKind::AddressTypeChanged => AddressTypeChanged {
            new_case_id: Uuid::new_v4(),
            collection_case: sample_case(),
        }
        .into(),
        EventKind::NewAddressReported => NewAddress {
            source_case_id: Some("bbd55984-0dbf-4499-bfa7-0aa4228700e9".to_string()),
            collection_case: CollectionCaseNewAddress {
                id: "5c8e6ba9-f9ae-47ae-a4e5-7797c27a0e2a".to_string(),
                case_type: "SPG".to_string(),
                survey: "CENSUS".to_string(),
                collection_exercise_id: "n66de4dc-3c3b-11e9-b210-d663bd873d93".to_string(),
                address: Address {
                    lines: sample_address(),
                    ..Address::default()
                },
                ..CollectionCaseNewAddress::default()
            },
        }
        .into(),
        EventKind::QuestionnaireLinked => QuestionnaireLinkedDetails {
            questionnaire_id: "1110000009".to_string(),
            case_id: Uuid::new_v4(),
            individual_case_id: Some(Uuid::new_v4()),
        }
        .into(),
        EventKind::Feedback => Feedback {
            page_url: "/en/start".to_string(),
            page_title: "Start survey".to_string(),
            feedback_text: "could not find my postcode".to_string(),
        }
        .into(),
        other => panic!("no sample payload for unregistered kind {other}"),
    }
}

#[test]
fn build_then_reconstruct_round_trips_every_registered_kind() {
    let registry = Registry::new();

    for kind in registry.kinds() {
        let registration = registry.resolve(kind).unwrap();
        let request = SendRequest {
            payload: sample_payload(kind),
            source: Source::ContactCentreApi,
            channel: Channel::Cc,
        };

        let envelope = registration.builder.build(&request).unwrap();
        assert_eq!(envelope.kind(), kind, "header kind for {kind}");

        let json = envelope.to_json().unwrap();
        let recovered = registration.builder.reconstruct(&json).unwrap();

        assert_eq!(recovered.payload, request.payload, "payload for {kind}");
        assert_eq!(recovered.source, request.source, "source for {kind}");
        assert_eq!(recovered.channel, request.channel, "channel for {kind}");
    }
}

/// Fail a publish into the in-memory store and hand back the captured record.
async fn backed_up_record(kind: EventKind) -> EventBackup {
    let persistence = Arc::new(InMemoryEventPersistence::new());
    let publisher = EventPublisher::builder(Arc::new(FailingSender::default()))
        .persistence(persistence.clone())
        .build();

    publisher
        .publish(kind, Source::RespondentHome, Channel::Rh, sample_payload(kind))
        .await
        .unwrap();

    let mut records = persistence.records();
    assert_eq!(records.len(), 1);
    records.remove(0)
}

#[tokio::test]
async fn replay_mints_a_fresh_identity_and_later_timestamp() {
    let record = backed_up_record(EventKind::SurveyLaunched).await;

    let original: serde_json::Value = serde_json::from_str(&record.serialized_envelope).unwrap();
    let original_header: Header = serde_json::from_value(original["event"].clone()).unwrap();

    let sender = Arc::new(RecordingSender::default());
    let publisher = EventPublisher::new(sender.clone());

    let replayed_id = publisher.replay(&record).await.unwrap();

    assert_ne!(replayed_id, original_header.transaction_id);
    assert_ne!(replayed_id.to_string(), record.record_id);

    let headers = sender.headers();
    assert_eq!(headers.len(), 1);
    let replayed = &headers[0];
    assert_eq!(replayed.transaction_id, replayed_id);
    assert_eq!(replayed.kind, EventKind::SurveyLaunched);
    assert_eq!(replayed.source, original_header.source);
    assert_eq!(replayed.channel, original_header.channel);
    assert!(replayed.date_time > original_header.date_time);
}

#[tokio::test]
async fn successful_replay_leaves_no_new_backup() {
    let record = backed_up_record(EventKind::CaseCreated).await;

    let sender = Arc::new(RecordingSender::default());
    let persistence = Arc::new(InMemoryEventPersistence::new());
    let publisher = EventPublisher::builder(sender.clone())
        .persistence(persistence.clone())
        .build();

    publisher.replay(&record).await.unwrap();

    // Delivery succeeded, so nothing new was backed up.
    assert!(persistence.records().is_empty());
}

#[tokio::test]
async fn failed_replay_is_backed_up_again() {
    let record = backed_up_record(EventKind::Feedback).await;

    let persistence = Arc::new(InMemoryEventPersistence::new());
    let publisher = EventPublisher::builder(Arc::new(FailingSender::default()))
        .persistence(persistence.clone())
        .build();

    let new_id = publisher.replay(&record).await.unwrap();

    let records = persistence.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_id, new_id.to_string());
    assert_ne!(records[0].record_id, record.record_id);
}

#[tokio::test]
async fn replay_of_unregistered_kind_is_rejected() {
    let record = EventBackup {
        event_kind: EventKind::FulfilmentConfirmed,
        failure_timestamp_millis: 1_700_000_000_000,
        sent_timestamp_millis: None,
        record_id: Uuid::new_v4().to_string(),
        serialized_envelope: "{}".to_string(),
    };

    let publisher = EventPublisher::new(Arc::new(RecordingSender::default()));
    let result = publisher.replay(&record).await;

    assert!(matches!(
        result,
        Err(PublishError::UnregisteredKind {
            kind: EventKind::FulfilmentConfirmed
        })
    ));
}

#[tokio::test]
async fn corrupted_record_is_malformed_and_does_not_poison_the_publisher() {
    let good = backed_up_record(EventKind::CaseCreated).await;

    let truncated = EventBackup {
        serialized_envelope: good.serialized_envelope[..good.serialized_envelope.len() / 2]
            .to_string(),
        ..good.clone()
    };
    let wrong_shape = EventBackup {
        serialized_envelope: r#"{"event": {}, "payload": {"uac": {}}}"#.to_string(),
        ..good.clone()
    };

    let sender = Arc::new(RecordingSender::default());
    let publisher = EventPublisher::new(sender.clone());

    for bad in [&truncated, &wrong_shape] {
        let result = publisher.replay(bad).await;
        assert!(matches!(
            result,
            Err(PublishError::MalformedBackup {
                kind: EventKind::CaseCreated,
                ..
            })
        ));
    }

    // Other records still replay after a malformed one.
    publisher.replay(&good).await.unwrap();
    assert_eq!(sender.headers().len(), 1);
}
