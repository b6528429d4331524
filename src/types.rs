//! Wire types for the prompt submission endpoints.

use serde::{Deserialize, Serialize};

/// Outbound JSON body for `POST /api/send-prompt`. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub content: String,
    pub email: String,
}

impl PromptRequest {
    pub fn new(content: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            email: email.into(),
        }
    }
}

/// Backend reply to a prompt.
///
/// Decoding only requires a JSON object. Every field may be absent or `null`
/// (both decode to `None`) and unknown fields are ignored; values are kept as
/// sent, so `createdAt` stays whatever JSON number the backend produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptResponse {
    pub id: Option<String>,
    pub content: Option<String>,
    pub model_id: Option<String>,
    /// Creation time as reported by the backend (epoch-based).
    pub created_at: Option<serde_json::Number>,
}

impl PromptResponse {
    /// Reply text, empty when the backend sent none.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// CSV file sent alongside a prompt to `POST /api/send-prompt-with-csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvAttachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}
