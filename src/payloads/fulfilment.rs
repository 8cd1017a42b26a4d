//! Fulfilment request payload.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::case::Contact;

/// A request for printed or SMS fulfilment material against a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentRequest {
    pub fulfilment_code: String,
    pub case_id: String,
    pub individual_case_id: Option<String>,
    pub contact: Contact,
    pub address: Address,
}
