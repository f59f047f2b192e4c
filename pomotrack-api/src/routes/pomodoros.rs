/// Pomodoro session endpoints
///
/// A pomodoro is started when the client begins a focus timer and
/// completed when the timer runs out. The record is created immediately;
/// an abandoned timer simply stays incomplete and never counts toward
/// statistics.
///
/// # Endpoints
///
/// - `POST /v1/pomodoros` - Start a session (optionally linked to a task)
/// - `POST /v1/pomodoros/:id/complete` - Mark a session completed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use pomotrack_shared::{
    auth::middleware::AuthContext,
    models::{
        pomodoro::{CreatePomodoro, Pomodoro, DEFAULT_DURATION_MINUTES},
        task::Task,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Start pomodoro request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartPomodoroRequest {
    /// Optional task to associate; must belong to the caller
    pub task_id: Option<Uuid>,

    /// Session length in minutes (default: 25)
    #[validate(range(min = 1, max = 240, message = "Duration must be between 1 and 240 minutes"))]
    pub duration: Option<i32>,
}

/// Start pomodoro response
#[derive(Debug, Serialize)]
pub struct StartPomodoroResponse {
    /// Created session ID
    pub pomodoro_id: Uuid,

    /// Session length in minutes
    pub duration: i32,
}

/// Complete pomodoro response
#[derive(Debug, Serialize)]
pub struct CompletePomodoroResponse {
    /// Completed session ID
    pub pomodoro_id: Uuid,

    /// Always true after completion
    pub completed: bool,
}

/// Start a new pomodoro session
///
/// If `task_id` is given, the task must exist and be owned by the
/// caller; a task belonging to another user is rejected before any row
/// is created.
///
/// # Errors
///
/// - `400 Bad Request`: task_id does not reference one of the caller's tasks
/// - `422 Unprocessable Entity`: duration out of range
pub async fn start_pomodoro(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<StartPomodoroRequest>,
) -> ApiResult<Json<StartPomodoroResponse>> {
    req.validate().map_err(ApiError::from)?;

    // Validate task ownership if a task is linked. The lookup is scoped
    // by user_id, so another user's task id behaves exactly like a
    // nonexistent one.
    if let Some(task_id) = req.task_id {
        Task::find_by_id_and_user(&state.db, task_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Invalid task".to_string()))?;
    }

    let duration = req.duration.unwrap_or(DEFAULT_DURATION_MINUTES);

    let pomodoro = Pomodoro::create(
        &state.db,
        CreatePomodoro {
            user_id: auth.user_id,
            task_id: req.task_id,
            duration,
        },
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        pomodoro_id = %pomodoro.id,
        duration = pomodoro.duration,
        "Pomodoro started"
    );

    Ok(Json(StartPomodoroResponse {
        pomodoro_id: pomodoro.id,
        duration: pomodoro.duration,
    }))
}

/// Mark a pomodoro session as completed
///
/// Idempotent: completing an already-completed session succeeds without
/// changing anything.
///
/// # Errors
///
/// - `404 Not Found`: no session with that id owned by the caller
pub async fn complete_pomodoro(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(pomodoro_id): Path<Uuid>,
) -> ApiResult<Json<CompletePomodoroResponse>> {
    let pomodoro = Pomodoro::complete(&state.db, pomodoro_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pomodoro not found".to_string()))?;

    tracing::info!(
        user_id = %auth.user_id,
        pomodoro_id = %pomodoro.id,
        "Pomodoro completed"
    );

    Ok(Json(CompletePomodoroResponse {
        pomodoro_id: pomodoro.id,
        completed: pomodoro.completed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_duration_bounds() {
        let valid = StartPomodoroRequest {
            task_id: None,
            duration: Some(25),
        };
        assert!(valid.validate().is_ok());

        let unset = StartPomodoroRequest {
            task_id: None,
            duration: None,
        };
        assert!(unset.validate().is_ok());

        let zero = StartPomodoroRequest {
            task_id: None,
            duration: Some(0),
        };
        assert!(zero.validate().is_err());

        let too_long = StartPomodoroRequest {
            task_id: None,
            duration: Some(241),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_start_response_serialization() {
        let response = StartPomodoroResponse {
            pomodoro_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            duration: 25,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("pomodoro_id"));
        assert!(json.contains("\"duration\":25"));
    }
}
