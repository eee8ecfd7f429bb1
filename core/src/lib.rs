//! Task synchronization core for the task-tracking service.
//!
//! # Overview
//! `TaskStore` owns the client's copy of the task list and turns user intent
//! (create, complete, delete) into API calls, re-reading the full list after
//! every successful write. `codec` normalizes drafts into the wire schema and
//! decodes responses strictly; `report` turns failures into one display line.
//!
//! # Design
//! - `TaskClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - A `Transport` executes requests. `ReqwestTransport` is the real one;
//!   tests plug in scripted services.
//! - Wire DTOs (`wire`) are separate from domain types (`types`) and are
//!   defined independently from the mock-server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod store;
pub mod transport;
pub mod types;
pub mod wire;

pub use client::TaskClient;
pub use config::ClientConfig;
pub use error::{Operation, OperationError, TaskError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::TaskStore;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Draft, Priority, Task, TaskId};
