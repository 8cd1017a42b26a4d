//! Website feedback payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub page_url: String,
    pub page_title: String,
    pub feedback_text: String,
}
