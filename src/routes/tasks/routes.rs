use axum::{
    extract::{
        rejection::JsonRejection,
        Path, RawQuery, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use super::dto::{CreateTask, ListQuery, UpdateTask};
use crate::routes::error::ApiError;
use crate::state::AppState;

// Ids that are not UUIDs cannot name a stored task.
fn task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(id = %raw, "Task id is not a UUID");
        ApiError::NotFound
    })
}

/// List tasks, filtered by `status` and `search`
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> impl IntoResponse {
    let query = ListQuery::from_query_string(raw.as_deref().unwrap_or_default());

    let tasks = state.tasks.list(query.status(), query.search()).await;
    Json(tasks)
}

/// Create a task
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(error = %e, "Rejected create body");
        ApiError::Internal("Failed to create task")
    })?;

    body.validate()?;

    let title = body.title.as_deref().unwrap_or_default();
    let task = state
        .tasks
        .create(title, body.description.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Store rejected a validated task");
            ApiError::Internal("Failed to create task")
        })?;

    tracing::info!(id = %task.id, "Created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a single task by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = task_id(&id)?;

    match state.tasks.get_by_id(id).await {
        Some(task) => Ok(Json(task)),
        None => {
            tracing::debug!(%id, "Task not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Update a task; only the fields present in the body change
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(error = %e, "Rejected update body");
        ApiError::Internal("Failed to update task")
    })?;

    body.validate()?;
    let id = task_id(&id)?;

    let updated = state.tasks.update(id, &body).await.map_err(|e| {
        tracing::error!(error = %e, %id, "Store rejected a validated update");
        ApiError::Internal("Failed to update task")
    })?;

    match updated {
        Some(task) => {
            tracing::info!(%id, done = task.done, "Updated task");
            Ok(Json(task))
        }
        None => {
            tracing::debug!(%id, "Task not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Delete a task
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = task_id(&id)?;

    if !state.tasks.delete(id).await {
        tracing::debug!(%id, "Task not found");
        return Err(ApiError::NotFound);
    }

    tracing::info!(%id, "Deleted task");
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
