//! Collection case records and the contact details nested in them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address::Address;

/// A collection case as exchanged on the bus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCase {
    pub id: String,
    pub case_ref: String,
    pub case_type: String,
    pub survey: String,
    pub collection_exercise_id: String,
    pub address: Address,
    pub contact: Contact,
    pub actionable_from: Option<String>,
    pub hand_delivery: bool,
    pub address_invalid: bool,
    pub ce_expected_capacity: Option<i32>,
    pub created_date_time: Option<DateTime<Utc>>,
}

/// Reduced case record embedded in address and refusal events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCaseCompact {
    pub id: Uuid,
    pub case_type: Option<String>,
    pub ce_expected_capacity: Option<i32>,
}

/// Case record used when a respondent reports an address not yet known to
/// the survey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCaseNewAddress {
    pub id: String,
    pub case_type: String,
    pub survey: String,
    pub collection_exercise_id: String,
    pub organisation_name: Option<String>,
    pub ce_expected_capacity: Option<i32>,
    pub field_coordinator_id: Option<String>,
    pub field_officer_id: Option<String>,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCompact {
    pub title: Option<String>,
    pub forename: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(flatten)]
    pub name: ContactCompact,
    pub tel_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_field_names_follow_wire_format() {
        let case = CollectionCase {
            id: "abc".to_string(),
            case_ref: "10000000010".to_string(),
            ..CollectionCase::default()
        };

        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["caseRef"], "10000000010");
        assert!(json.get("collectionExerciseId").is_some());
        assert!(json.get("handDelivery").is_some());
    }

    #[test]
    fn contact_serializes_flat() {
        let contact = Contact {
            name: ContactCompact {
                forename: Some("Ann".to_string()),
                surname: Some("Casbolt".to_string()),
                ..ContactCompact::default()
            },
            tel_no: Some("01234 567890".to_string()),
        };

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["forename"], "Ann");
        assert_eq!(json["telNo"], "01234 567890");
        assert!(json.get("name").is_none());
    }
}
