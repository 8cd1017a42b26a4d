//! Respondent-initiated event payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address::AddressCompact;
use super::case::{CollectionCaseCompact, ContactCompact};

/// Raised when a respondent launches their questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyLaunchedResponse {
    pub questionnaire_id: String,
    pub case_id: Uuid,
    pub agent_id: Option<String>,
}

/// Raised when a respondent authenticates against a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentAuthenticatedResponse {
    pub questionnaire_id: String,
    pub case_id: Uuid,
}

/// Details of a respondent refusing to take part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentRefusalDetails {
    #[serde(rename = "type")]
    pub refusal_type: String,
    pub agent_id: Option<String>,
    pub call_id: Option<String>,
    #[serde(rename = "isHouseholder")]
    pub is_householder: bool,
    pub collection_case: CollectionCaseCompact,
    pub contact: ContactCompact,
    pub address: AddressCompact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_keeps_historical_field_names() {
        let refusal = RespondentRefusalDetails {
            refusal_type: "HARD_REFUSAL".to_string(),
            is_householder: true,
            ..RespondentRefusalDetails::default()
        };

        let json = serde_json::to_value(&refusal).unwrap();
        assert_eq!(json["type"], "HARD_REFUSAL");
        assert_eq!(json["isHouseholder"], true);
    }
}
