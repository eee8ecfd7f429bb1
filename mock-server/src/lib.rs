use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body accepted by both create and update. Unknown fields such as `id` or
/// `created_at` are ignored.
#[derive(Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { detail: detail.into() }))
}

fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Task not found")
}

fn rejected(rejection: JsonRejection) -> ApiError {
    api_error(rejection.status(), rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> ApiError {
    api_error(rejection.status(), rejection.body_text())
}

/// Tasks keyed by id; ids only grow, so key order is insertion order.
#[derive(Default)]
pub struct Db {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<SharedDb>) -> Json<Vec<Task>> {
    let db = db.read().await;
    Json(db.tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<SharedDb>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(input) = payload.map_err(rejected)?;
    let mut db = db.write().await;
    db.last_id += 1;
    let task = Task {
        id: db.last_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        priority: input.priority,
        due_date: input.due_date,
        created_at: Utc::now(),
        updated_at: None,
    };
    db.tasks.insert(task.id, task.clone());
    info!(id = task.id, "created task");
    Ok(Json(task))
}

async fn update_task(
    State(db): State<SharedDb>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = path.map_err(bad_path)?;
    let Json(input) = payload.map_err(rejected)?;
    let mut db = db.write().await;
    let task = db.tasks.get_mut(&id).ok_or_else(not_found)?;
    task.title = input.title;
    task.description = input.description;
    task.completed = input.completed;
    task.priority = input.priority;
    task.due_date = input.due_date;
    task.updated_at = Some(Utc::now());
    info!(id, "updated task");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<SharedDb>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Path(id) = path.map_err(bad_path)?;
    let mut db = db.write().await;
    db.tasks.remove(&id).ok_or_else(not_found)?;
    info!(id, "deleted task");
    Ok(Json(Ack {
        message: "Task deleted successfully".to_string(),
    }))
}
