//! Domain types for the task service.
//!
//! # Design
//! These are the shapes the rest of the client works with. They carry no
//! serde attributes: the JSON exchanged with the service lives in `wire`, and
//! `codec` is the only place that converts between the two. Keeping them
//! apart lets the wire schema stay strict (unknown priority tokens are
//! rejected) without leaking `String` fields into the domain.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::TaskError;

/// Server-assigned task identifier. The client never mints one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// Task priority. `Medium` is what an unset priority means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Symbolic form shown in forms and menus (`LOW`, `MEDIUM`, `HIGH`).
    pub fn ui_token(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ui_token())
    }
}

/// Parses the UI token. Case-insensitive so `high` from a command line works
/// as well as `HIGH` from a menu.
impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.ui_token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaskError::Validation(format!("unknown priority `{s}`")))
    }
}

/// A task as last reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Server-computed; read-only on the client.
    pub created_at: Option<DateTime<Utc>>,
    /// Server-computed; absent until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// An in-progress form entry that has not been submitted yet.
///
/// The due date keeps whatever offset the user entered it in; encoding
/// normalizes it to an absolute UTC instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<FixedOffset>>,
}

impl Draft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due<Tz: chrono::TimeZone>(mut self, due: DateTime<Tz>) -> Self {
        self.due_date = Some(due.fixed_offset());
        self
    }

    /// Rejects drafts the service would store without a usable title.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.title.is_empty() {
            return Err(TaskError::Validation("title must not be empty".to_string()));
        }
        Ok(())
    }
}
