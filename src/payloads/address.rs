//! Address records and the address-lifecycle event payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::case::{CollectionCase, CollectionCaseCompact, CollectionCaseNewAddress};

/// Address lines shared by every address-bearing payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCompact {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub town_name: String,
    pub postcode: String,
    // E, W or N
    pub region: String,
    pub uprn: Option<String>,
    pub estab_type: Option<String>,
    pub organisation_name: Option<String>,
}

/// Full address record, including resolution metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(flatten)]
    pub lines: AddressCompact,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub estab_uprn: Option<String>,
    pub address_type: Option<String>,
    pub address_level: Option<String>,
}

/// A respondent-supplied correction to a case address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressModification {
    pub collection_case: CollectionCaseCompact,
    pub original_address: AddressCompact,
    pub new_address: AddressCompact,
}

/// A report that a case address does not exist or is unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressNotValid {
    pub collection_case: CollectionCaseCompact,
    pub reason: String,
    pub notes: Option<String>,
}

/// A reclassification of a case address (e.g. household to communal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressTypeChanged {
    pub new_case_id: Uuid,
    pub collection_case: CollectionCase,
}

/// A brand-new address reported against an existing case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub source_case_id: Option<String>,
    pub collection_case: CollectionCaseNewAddress,
}
