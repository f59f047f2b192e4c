/// Task management endpoints
///
/// All endpoints here require a valid session; the session guard injects
/// [`AuthContext`] and every model call carries the authenticated
/// `user_id`, so one user's tasks are invisible to another.
///
/// # Endpoints
///
/// - `GET    /v1/tasks?status=&priority=` - List with filters
/// - `POST   /v1/tasks` - Create
/// - `PUT    /v1/tasks/:id` - Full replace of mutable fields
/// - `POST   /v1/tasks/:id/toggle` - Flip completion
/// - `DELETE /v1/tasks/:id` - Delete

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use pomotrack_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, PriorityFilter, StatusFilter, Task, TaskPriority, UpdateTask},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for task listing
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Status filter (default: pending)
    #[serde(default)]
    pub status: StatusFilter,

    /// Priority filter (default: all)
    #[serde(default)]
    pub priority: PriorityFilter,
}

/// Create/update task request body
///
/// The same shape serves create and update: an update is a full replace
/// of the mutable fields, not a partial merge.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskForm {
    /// Task title (required, non-empty after trimming)
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Priority (default: medium)
    pub priority: Option<TaskPriority>,

    /// Optional deadline as `YYYY-MM-DD`; empty string counts as unset
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Toggle response: the new status, for user feedback
#[derive(Debug, Serialize)]
pub struct ToggleTaskResponse {
    /// Toggled task ID
    pub task_id: Uuid,

    /// Completion state after the toggle
    pub completed: bool,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    /// Deleted task ID
    pub task_id: Uuid,

    /// Always true on success
    pub deleted: bool,
}

/// Parses a deadline form value into a calendar date
///
/// Empty or missing input means "no deadline"; anything else must be
/// `YYYY-MM-DD`.
fn parse_deadline(deadline: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match deadline {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::ValidationError(vec![ValidationErrorDetail::new(
                    "deadline",
                    "Invalid date format",
                )])
            }),
    }
}

/// Validates a task form and extracts its fields
fn validated_fields(
    form: &TaskForm,
) -> Result<(String, String, TaskPriority, Option<NaiveDate>), ApiError> {
    form.validate().map_err(ApiError::from)?;

    let title = form.title.trim();
    if title.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "title",
            "Task title is required",
        )]));
    }

    let deadline = parse_deadline(form.deadline.as_deref())?;

    Ok((
        title.to_string(),
        form.description.trim().to_string(),
        form.priority.unwrap_or_default(),
        deadline,
    ))
}

/// List tasks with optional status/priority filters
///
/// Ordering: incomplete before complete, then ascending deadline with
/// null deadlines last, then newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_user(
        &state.db,
        auth.user_id,
        query.status.as_completed(),
        query.priority.as_priority(),
    )
    .await?;

    Ok(Json(tasks))
}

/// Create a new task
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty title or malformed deadline
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<TaskForm>,
) -> ApiResult<Json<Task>> {
    let (title, description, priority, deadline) = validated_fields(&form)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title,
            description,
            priority,
            deadline,
        },
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, task_id = %task.id, "Task created");

    Ok(Json(task))
}

/// Replace all mutable fields of an existing task
///
/// # Errors
///
/// - `404 Not Found`: no task with that id owned by the caller
/// - `422 Unprocessable Entity`: empty title or malformed deadline
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(form): Json<TaskForm>,
) -> ApiResult<Json<Task>> {
    let (title, description, priority, deadline) = validated_fields(&form)?;

    let task = Task::update(
        &state.db,
        task_id,
        auth.user_id,
        UpdateTask {
            title,
            description,
            priority,
            deadline,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(user_id = %auth.user_id, task_id = %task.id, "Task updated");

    Ok(Json(task))
}

/// Flip a task's completion flag
///
/// # Errors
///
/// - `404 Not Found`: no task with that id owned by the caller
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<ToggleTaskResponse>> {
    let task = Task::toggle(&state.db, task_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(ToggleTaskResponse {
        task_id: task.id,
        completed: task.completed,
    }))
}

/// Permanently delete a task
///
/// Linked pomodoros are kept; the store nulls their task reference.
///
/// # Errors
///
/// - `404 Not Found`: no task with that id owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let deleted = Task::delete(&state.db, task_id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(user_id = %auth.user_id, task_id = %task_id, "Task deleted");

    Ok(Json(DeleteTaskResponse {
        task_id,
        deleted: true,
    }))
}
