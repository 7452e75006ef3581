//! Task endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::envelope::ApiResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiJsonOrDefault, TaskIdPath};
use crate::models::{NewTask, Task, TaskChanges, TaskPatch, TaskPriority, TaskStatus, TaskTitle};
use crate::state::AppState;

/// Create task request
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id.to_string(),
            completed: t.completed(),
            title: t.title,
            status: t.status,
            priority: t.priority,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

type TaskJson = Json<ApiResponse<TaskResponse>>;

/// GET /tasks - list every task, highest priority first
async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TaskResponse>>>, ApiError> {
    let tasks = state.store().list_all().await?;
    Ok(Json(ApiResponse::ok(
        tasks.into_iter().map(TaskResponse::from).collect(),
    )))
}

/// POST /tasks - create a task
async fn create_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, TaskJson), ApiError> {
    let title = TaskTitle::new(req.title.as_deref().unwrap_or_default())?;
    let new_task = NewTask::new(title)
        .with_status(req.status)
        .with_priority(req.priority);

    let task = state.store().create(new_task).await?;
    tracing::info!(id = %task.id, "task created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TaskResponse::from(task))),
    ))
}

/// PUT /tasks/{id} - update any subset of title, status, priority, completed
async fn update_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    ApiJsonOrDefault(body): ApiJsonOrDefault<TaskPatch>,
) -> Result<TaskJson, ApiError> {
    let changes = body.into_changes()?;
    let task = state
        .store()
        .update(id, changes)
        .await?
        .ok_or_else(|| ApiError::task_not_found(id))?;

    Ok(Json(ApiResponse::ok(TaskResponse::from(task))))
}

/// DELETE /tasks/{id} - hard delete
async fn delete_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !state.store().delete(id).await? {
        return Err(ApiError::task_not_found(id));
    }

    tracing::info!(id = %id, "task deleted");
    Ok(Json(ApiResponse::message("Task deleted")))
}

/// PATCH /tasks/{id}/toggle - flip between Done and To Do
async fn toggle_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> Result<TaskJson, ApiError> {
    let current = state
        .store()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::task_not_found(id))?;

    let task = state
        .store()
        .update(id, TaskChanges::status(current.status.toggled()))
        .await?
        // Deleted between the read and the write.
        .ok_or_else(|| ApiError::task_not_found(id))?;

    Ok(Json(ApiResponse::ok(TaskResponse::from(task))))
}

/// Task routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/tasks/{id}/toggle", patch(toggle_task))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db::MemoryTaskStore;

    fn app() -> Router {
        router().with_state(AppState::new(Arc::new(MemoryTaskStore::new())))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn create_with_title_only_uses_defaults() {
        let app = app();
        let (status, body) = send(&app, "POST", "/tasks", Some(json!({"title": "Buy milk"}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], "1");
        assert_eq!(body["data"]["title"], "Buy milk");
        assert_eq!(body["data"]["status"], "To Do");
        assert_eq!(body["data"]["priority"], "Medium");
        assert_eq!(body["data"]["completed"], false);
        assert_eq!(body["data"]["created_at"], body["data"]["updated_at"]);
    }

    #[tokio::test]
    async fn create_trims_and_accepts_overrides() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/tasks",
            Some(json!({"title": "  Ship it  ", "status": "In Progress", "priority": "High"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["title"], "Ship it");
        assert_eq!(body["data"]["status"], "In Progress");
        assert_eq!(body["data"]["priority"], "High");
    }

    #[tokio::test]
    async fn create_rejects_blank_or_missing_title() {
        let app = app();

        let (status, body) = send(&app, "POST", "/tasks", Some(json!({"title": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "title is required");

        let (status, _) = send(&app, "POST", "/tasks", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Nothing reached the store
        let (_, body) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn create_rejects_unknown_enum_value() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/tasks",
            Some(json!({"title": "x", "priority": "Urgent"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn list_orders_by_priority() {
        let app = app();
        for (title, priority) in [("low", "Low"), ("high", "High"), ("medium", "Medium")] {
            send(&app, "POST", "/tasks", Some(json!({"title": title, "priority": priority}))).await;
        }

        let (status, body) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(status, StatusCode::OK);

        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["high", "medium", "low"]);
    }

    #[tokio::test]
    async fn update_with_empty_body_returns_current() {
        let app = app();
        let (_, created) = send(&app, "POST", "/tasks", Some(json!({"title": "same"}))).await;

        let (status, body) = send(&app, "PUT", "/tasks/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], created["data"]);
    }

    #[tokio::test]
    async fn update_without_body_returns_current() {
        let app = app();
        let (_, created) = send(&app, "POST", "/tasks", Some(json!({"title": "untouched"}))).await;

        let (status, body) = send(&app, "PUT", "/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], created["data"]);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/tasks/1")
                    .header("content-type", "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _) = send(&app, "PUT", "/tasks/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_rejects_control_characters_in_title() {
        let app = app();
        let (status, body) = send(&app, "POST", "/tasks", Some(json!({"title": "a\u{0}b"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title contains invalid characters");

        let (_, body) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn update_completed_bridges_to_status() {
        let app = app();
        send(&app, "POST", "/tasks", Some(json!({"title": "legacy"}))).await;

        let (_, body) = send(&app, "PUT", "/tasks/1", Some(json!({"completed": true}))).await;
        assert_eq!(body["data"]["status"], "Done");
        assert_eq!(body["data"]["completed"], true);

        let (_, body) = send(&app, "PUT", "/tasks/1", Some(json!({"completed": false}))).await;
        assert_eq!(body["data"]["status"], "To Do");
        assert_eq!(body["data"]["completed"], false);

        let (_, body) = send(
            &app,
            "PUT",
            "/tasks/1",
            Some(json!({"status": "On Hold", "completed": true})),
        )
        .await;
        assert_eq!(body["data"]["status"], "Done");
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let app = app();
        send(&app, "POST", "/tasks", Some(json!({"title": "keep"}))).await;

        let (status, _) = send(&app, "PUT", "/tasks/1", Some(json!({"title": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/tasks", None).await;
        assert_eq!(body["data"][0]["title"], "keep");
    }

    #[tokio::test]
    async fn missing_or_malformed_ids_are_404() {
        let app = app();

        for (method, uri) in [
            ("PUT", "/tasks/99"),
            ("DELETE", "/tasks/99"),
            ("PATCH", "/tasks/99/toggle"),
            ("DELETE", "/tasks/not-a-number"),
        ] {
            let body = (method == "PUT").then(|| json!({"priority": "Low"}));
            let (status, response) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
            assert_eq!(response["error"], "Task not found");
        }
    }

    #[tokio::test]
    async fn toggle_round_trips() {
        let app = app();
        send(&app, "POST", "/tasks", Some(json!({"title": "flip", "status": "In Progress"}))).await;

        let (_, body) = send(&app, "PATCH", "/tasks/1/toggle", None).await;
        assert_eq!(body["data"]["status"], "Done");

        let (_, body) = send(&app, "PATCH", "/tasks/1/toggle", None).await;
        assert_eq!(body["data"]["status"], "To Do");

        let (_, body) = send(&app, "PATCH", "/tasks/1/toggle", None).await;
        assert_eq!(body["data"]["status"], "Done");
    }

    #[tokio::test]
    async fn delete_then_gone() {
        let app = app();
        send(&app, "POST", "/tasks", Some(json!({"title": "bye"}))).await;

        let (status, body) = send(&app, "DELETE", "/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "message": "Task deleted"}));

        let (status, _) = send(&app, "DELETE", "/tasks/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_400_envelope() {
        let app = app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }
}
