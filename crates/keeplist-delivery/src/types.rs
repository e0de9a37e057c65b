//! Dynalist inbox API request and response types.

use serde::{Deserialize, Serialize};

use keeplist_core::defaults::INBOX_SUCCESS_CODE;

/// Request body for the inbox/add endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InboxRequest {
    pub token: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<bool>,
}

impl InboxRequest {
    /// Build a request for a content/note pair. An empty note is omitted
    /// from the wire body entirely.
    pub fn new(token: impl Into<String>, content: impl Into<String>, note: &str) -> Self {
        Self {
            token: token.into(),
            content: content.into(),
            note: (!note.is_empty()).then(|| note.to_string()),
            index: None,
            checked: None,
            checkbox: None,
        }
    }
}

/// Response from the inbox/add endpoint.
///
/// The endpoint signals errors at the application level: the HTTP status is
/// usually 200 and `_code` carries the actual outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxResponse {
    #[serde(rename = "_code")]
    pub code: String,
    #[serde(rename = "_msg", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub index: Option<i32>,
}

impl InboxResponse {
    /// Whether the endpoint accepted the item.
    pub fn is_ok(&self) -> bool {
        self.code == INBOX_SUCCESS_CODE
    }
}
