//! The response envelope of the record API.

use serde::Deserialize;

use super::Record;

/// The envelope every record API response is wrapped in.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

impl<T> Envelope<T> {
    /// The failure message, falling back to a generic one when the API gave none.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "the record API did not give a reason".to_owned())
    }
}

/// The outcome of creating, updating or deleting one record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl MutationResult {
    /// The field errors formatted as `"{field label}: {message}"`, followed by
    /// the result's own message.
    pub fn failure_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|error| format!("{}: {}", error.field_label, error.message))
            .chain(self.message.iter().cloned())
            .collect()
    }
}

/// A validation error the record API reports against a single field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel")]
    pub field_label: String,
    pub message: String,
}
