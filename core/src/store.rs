//! Client-side mirror of the service's task list.
//!
//! # Design
//! The service is the only writer. Every mutation is sent, then the whole
//! list is re-read (`refresh`) instead of patching the local copy, so fields
//! the server computes (`updated_at`, defaults) never drift. A failed
//! operation leaves the list as it was after the last successful refresh.
//!
//! Operations are serialized through a FIFO async lock: two overlapping
//! calls complete in the order they were issued, and the visible list
//! always comes from the refresh of the last one. Observers read snapshots
//! or subscribe to a `watch` channel that fires after each refresh.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

use crate::client::TaskClient;
use crate::config::ClientConfig;
use crate::error::{Operation, OperationError, TaskError};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Draft, Task, TaskId};

/// Owns the task list for one session.
pub struct TaskStore<T = ReqwestTransport> {
    client: TaskClient,
    transport: T,
    tasks: watch::Sender<Arc<Vec<Task>>>,
    ops: Mutex<()>,
}

impl TaskStore<ReqwestTransport> {
    /// Builds a store talking to the configured service over HTTP. The list
    /// is empty until the first `refresh`.
    pub fn connect(config: &ClientConfig) -> Result<Self, TaskError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(TaskClient::new(&config.base_url), transport))
    }
}

impl<T: Transport> TaskStore<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        let (tasks, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            client,
            transport,
            tasks,
            ops: Mutex::new(()),
        }
    }

    /// Snapshot of the list as of the last successful refresh.
    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.tasks.borrow().clone()
    }

    /// Receiver that is marked changed after every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Task>>> {
        self.tasks.subscribe()
    }

    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), OperationError> {
        let _guard = self.ops.lock().await;
        self.resync().await
    }

    /// Validates the draft, creates it, then refreshes. Returns the task as
    /// the server created it.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: &Draft) -> Result<Task, OperationError> {
        let fail = |e| operation_failed(Operation::Create, e);
        draft.validate().map_err(fail)?;

        let _guard = self.ops.lock().await;
        let request = self.client.build_create_task(draft).map_err(fail)?;
        let response = self.transport.execute(request).await.map_err(fail)?;
        let created = self.client.parse_create_task(response).map_err(fail)?;
        info!(id = %created.id, "task created");

        self.resync().await?;
        Ok(created)
    }

    /// Sends the full record with only `completed` changed, then refreshes.
    /// The caller's `task` is not modified.
    #[instrument(skip(self, task), fields(id = %task.id))]
    pub async fn set_completed(&self, task: &Task, completed: bool) -> Result<(), OperationError> {
        let fail = |e| operation_failed(Operation::Update, e);
        let updated = Task {
            completed,
            ..task.clone()
        };

        let _guard = self.ops.lock().await;
        let request = self.client.build_update_task(&updated).map_err(fail)?;
        let response = self.transport.execute(request).await.map_err(fail)?;
        self.client.parse_update_task(response).map_err(fail)?;
        info!(completed, "task updated");

        self.resync().await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: TaskId) -> Result<(), OperationError> {
        let fail = |e| operation_failed(Operation::Delete, e);

        let _guard = self.ops.lock().await;
        let request = self.client.build_delete_task(id);
        let response = self.transport.execute(request).await.map_err(fail)?;
        self.client.parse_delete_task(response).map_err(fail)?;
        info!("task deleted");

        self.resync().await
    }

    /// Replaces the list with a fresh read. Callers must hold `ops`.
    async fn resync(&self) -> Result<(), OperationError> {
        let fail = |e| operation_failed(Operation::Fetch, e);
        let request = self.client.build_list_tasks();
        let response = self.transport.execute(request).await.map_err(fail)?;
        let tasks = self.client.parse_list_tasks(response).map_err(fail)?;
        debug!(count = tasks.len(), "task list refreshed");
        self.tasks.send_replace(Arc::new(tasks));
        Ok(())
    }
}

fn operation_failed(operation: Operation, source: TaskError) -> OperationError {
    let err = OperationError::new(operation, source);
    warn!(%operation, error = %err.source, "task operation failed");
    err
}
