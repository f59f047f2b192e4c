/// Dashboard summary endpoint
///
/// The data behind the landing page: the user's pending tasks (for the
/// timer's task picker) and today's headline counters.
///
/// # Endpoint
///
/// ```text
/// GET /v1/dashboard
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use chrono::Utc;
use pomotrack_shared::{
    auth::middleware::AuthContext,
    models::{pomodoro::Pomodoro, task::Task},
};
use serde::Serialize;

/// Dashboard summary response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Pending tasks, ordered by ascending deadline (nulls last) then
    /// newest first
    pub pending_tasks: Vec<Task>,

    /// Completed pomodoros started today
    pub today_pomodoros: i64,

    /// Completed tasks created today
    pub today_completed_tasks: i64,
}

/// Dashboard summary handler
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardResponse>> {
    let today = Utc::now().date_naive();

    let pending_tasks = Task::list_pending_by_user(&state.db, auth.user_id).await?;
    let today_pomodoros = Pomodoro::count_completed_on(&state.db, auth.user_id, today).await?;
    let today_completed_tasks =
        Task::count_completed_created_on(&state.db, auth.user_id, today).await?;

    Ok(Json(DashboardResponse {
        pending_tasks,
        today_pomodoros,
        today_completed_tasks,
    }))
}
