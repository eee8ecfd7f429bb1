//! Turns a failed operation into the single line shown to the user.

use crate::error::{Operation, TaskError};

/// Fixed message used when the service gave no usable detail.
pub fn fallback_message(operation: Operation) -> &'static str {
    match operation {
        Operation::Fetch => "Failed to fetch tasks",
        Operation::Create => "Failed to create task",
        Operation::Update => "Failed to update task",
        Operation::Delete => "Failed to delete task",
    }
}

/// Prefers the server-supplied detail when it is present and non-blank,
/// otherwise falls back to the per-operation message.
pub fn describe(operation: Operation, error: &TaskError) -> String {
    match error {
        TaskError::Server {
            detail: Some(detail),
            ..
        } if !detail.trim().is_empty() => detail.clone(),
        _ => fallback_message(operation).to_string(),
    }
}
