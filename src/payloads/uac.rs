//! Unique access code payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique access code issued for a questionnaire.
///
/// Only the hash of the code ever crosses the bus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uac {
    pub uac_hash: String,
    pub active: Option<String>,
    pub questionnaire_id: String,
    pub case_id: String,
    pub form_type: Option<String>,
}

/// Details of a questionnaire being linked to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireLinkedDetails {
    pub questionnaire_id: String,
    pub case_id: Uuid,
    pub individual_case_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uac_round_trips() {
        let uac = Uac {
            uac_hash: "6b9d56e0d1a5a257d0d0a2e2c7d8c3b1".to_string(),
            active: Some("true".to_string()),
            questionnaire_id: "1110000009".to_string(),
            case_id: "bbd55984-0dbf-4499-bfa7-0aa4228700e9".to_string(),
            form_type: Some("H".to_string()),
        };

        let json = serde_json::to_string(&uac).unwrap();
        assert!(json.contains("\"uacHash\""));
        let back: Uac = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uac);
    }
}
