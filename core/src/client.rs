//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is the `Transport`'s job, so everything here is
//! deterministic.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::error::TaskError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Draft, Task, TaskId};
use crate::wire::{WireError, WireTask};

/// Request builder and response parser for `/api/tasks`.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Encodes the draft; does not validate it. `TaskStore::create` checks
    /// the title before getting this far.
    pub fn build_create_task(&self, draft: &Draft) -> Result<HttpRequest, TaskError> {
        json_request(HttpMethod::Post, self.collection_url(), &codec::encode_draft(draft))
    }

    /// Sends the full record, not a patch.
    pub fn build_update_task(&self, task: &Task) -> Result<HttpRequest, TaskError> {
        json_request(HttpMethod::Put, self.item_url(task.id), &codec::encode_task(task))
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, TaskError> {
        check_status(&response)?;
        codec::decode_tasks(decode_body(&response)?)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, TaskError> {
        check_status(&response)?;
        codec::decode_task(decode_body::<WireTask>(&response)?)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, TaskError> {
        check_status(&response)?;
        codec::decode_task(decode_body::<WireTask>(&response)?)
    }

    /// The acknowledgement body, if any, carries nothing we use.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), TaskError> {
        check_status(&response)
    }
}

fn json_request<T: Serialize>(method: HttpMethod, path: String, payload: &T) -> Result<HttpRequest, TaskError> {
    let body = serde_json::to_string(payload).map_err(|e| TaskError::Encode(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TaskError> {
    serde_json::from_str(&response.body).map_err(|e| TaskError::Decode(e.to_string()))
}

/// Map non-2xx statuses to `TaskError::Server`, pulling `detail` out of the
/// body when it is the service's JSON error shape.
fn check_status(response: &HttpResponse) -> Result<(), TaskError> {
    if response.is_success() {
        return Ok(());
    }
    let detail = serde_json::from_str::<WireError>(&response.body)
        .ok()
        .and_then(|body| body.message());
    Err(TaskError::Server {
        status: response.status,
        detail,
    })
}
