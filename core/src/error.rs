//! Error types for the task client.
//!
//! # Design
//! `TaskError` is the taxonomy every layer speaks: the codec raises `Decode`,
//! the client raises `Server`, transports raise `Network`, and draft checks
//! raise `Validation`. `TaskStore` wraps whichever one occurred in an
//! `OperationError` that also records which operation failed and the
//! display message `report::describe` derived for it.

use std::fmt;

use thiserror::Error;

use crate::report;

/// Errors raised while talking to the task service.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The draft was rejected locally; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status. `detail` is the
    /// human-readable reason from the response body, when it had one.
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Server { status: u16, detail: Option<String> },

    /// The response body did not match the wire schema.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encode failed: {0}")]
    Encode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// The store operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A failed `TaskStore` operation, ready to show to the user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    pub operation: Operation,
    pub message: String,
    #[source]
    pub source: TaskError,
}

impl OperationError {
    pub fn new(operation: Operation, source: TaskError) -> Self {
        let message = report::describe(operation, &source);
        Self {
            operation,
            message,
            source,
        }
    }
}
