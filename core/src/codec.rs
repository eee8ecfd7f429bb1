//! Conversion between domain types and the wire schema.
//!
//! # Design
//! Encoding is total: every `Draft` and `Task` has a wire form. Decoding is
//! strict: a priority token outside `low|medium|high`, or a timestamp that
//! does not parse, fails with `TaskError::Decode` rather than being coerced
//! to a default.
//!
//! Timestamps go out as RFC 3339 in UTC with a `Z` suffix and only as many
//! fractional digits as the value needs, so `decode(encode(t)) == t` holds
//! down to the nanosecond. On the way in, a value without an offset is read
//! as UTC: the service stores what this client sent with the offset dropped.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::TaskError;
use crate::types::{Draft, Priority, Task, TaskId};
use crate::wire::{WireTask, WireTaskInput};

pub fn encode_priority(priority: Option<Priority>) -> &'static str {
    match priority.unwrap_or_default() {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

pub fn decode_priority(token: &str) -> Result<Priority, TaskError> {
    match token {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(TaskError::Decode(format!("unknown priority `{other}`"))),
    }
}

pub fn encode_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn decode_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, TaskError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    // SQLite's CURRENT_TIMESTAMP separates date and time with a space.
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| TaskError::Decode(format!("invalid {field} `{raw}`: {e}")))
}

fn decode_optional_timestamp(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, TaskError> {
    raw.map(|r| decode_timestamp(field, r)).transpose()
}

pub fn encode_draft(draft: &Draft) -> WireTaskInput {
    WireTaskInput {
        title: draft.title.clone(),
        description: draft.description.clone(),
        priority: encode_priority(draft.priority).to_string(),
        due_date: draft.due_date.as_ref().map(encode_timestamp),
    }
}

pub fn encode_task(task: &Task) -> WireTask {
    WireTask {
        id: task.id.0,
        title: task.title.clone(),
        description: Some(task.description.clone()),
        priority: encode_priority(Some(task.priority)).to_string(),
        due_date: task.due_date.as_ref().map(encode_timestamp),
        completed: task.completed,
        created_at: task.created_at.as_ref().map(encode_timestamp),
        updated_at: task.updated_at.as_ref().map(encode_timestamp),
    }
}

pub fn decode_task(wire: WireTask) -> Result<Task, TaskError> {
    Ok(Task {
        id: TaskId(wire.id),
        priority: decode_priority(&wire.priority)?,
        due_date: decode_optional_timestamp("due_date", wire.due_date.as_deref())?,
        created_at: decode_optional_timestamp("created_at", wire.created_at.as_deref())?,
        updated_at: decode_optional_timestamp("updated_at", wire.updated_at.as_deref())?,
        title: wire.title,
        description: wire.description.unwrap_or_default(),
        completed: wire.completed,
    })
}

pub fn decode_tasks(wire: Vec<WireTask>) -> Result<Vec<Task>, TaskError> {
    wire.into_iter().map(decode_task).collect()
}
