//! JSON shapes exchanged with the task service.
//!
//! # Design
//! Fields the service owns loosely (priority tokens, timestamps) are kept as
//! strings here so that `codec` can reject bad values with a precise
//! `Decode` error instead of a generic serde message. `due_date` is a plain
//! `Option<String>` without `skip_serializing_if`: an absent deadline is sent
//! as an explicit `null`. On the way in the key itself must be present;
//! only `description` and the server timestamps may be left out.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts `null` but, unlike serde's default for `Option`, not a missing key.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A task as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: String,
    #[serde(deserialize_with = "required_nullable")]
    pub due_date: Option<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Creation payload: the task fields minus `id` and `completed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireTaskInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_date: Option<String>,
}

/// Error body returned by the service. `detail` is usually a string but is
/// a list of `{loc, msg, type}` objects for request validation failures.
#[derive(Debug, Deserialize)]
pub struct WireError {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl WireError {
    /// Flattens `detail` into a single message, if it carries one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
