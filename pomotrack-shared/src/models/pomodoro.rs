/// Pomodoro model and database operations
///
/// A pomodoro is a timed focus session: a duration in minutes, a
/// completion flag, and an optional association with one of the owner's
/// tasks. `started_at` is the session record creation time. The task link
/// is association, not ownership: deleting the task nulls the reference
/// and keeps the session row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pomodoros (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     task_id UUID REFERENCES tasks(id) ON DELETE SET NULL,
///     duration INTEGER NOT NULL DEFAULT 25,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     started_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Default focus session length in minutes
pub const DEFAULT_DURATION_MINUTES: i32 = 25;

/// Pomodoro model representing a timed focus session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pomodoro {
    /// Unique pomodoro ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Associated task, if any (nulled when the task is deleted)
    pub task_id: Option<Uuid>,

    /// Session length in minutes
    pub duration: i32,

    /// Whether the session was completed
    pub completed: bool,

    /// When the session record was created
    pub started_at: DateTime<Utc>,
}

/// Input for creating a new pomodoro
#[derive(Debug, Clone)]
pub struct CreatePomodoro {
    /// Owning user
    pub user_id: Uuid,

    /// Optional task association (must be owned by the same user)
    pub task_id: Option<Uuid>,

    /// Session length in minutes
    pub duration: i32,
}

/// Aggregate totals over a completed-pomodoro window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowTotals {
    /// Number of completed sessions in the window
    pub count: i64,

    /// Sum of their durations, in minutes
    pub total_minutes: i64,
}

impl Pomodoro {
    /// Creates a new pomodoro in the not-completed state
    ///
    /// Callers must have verified task ownership before passing a
    /// `task_id`; the FK constraint backstops a task deleted in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails (including a
    /// `task_id` that no longer exists)
    pub async fn create(pool: &PgPool, data: CreatePomodoro) -> Result<Self, sqlx::Error> {
        let pomodoro = sqlx::query_as::<_, Pomodoro>(
            r#"
            INSERT INTO pomodoros (user_id, task_id, duration)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, task_id, duration, completed, started_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.task_id)
        .bind(data.duration)
        .fetch_one(pool)
        .await?;

        Ok(pomodoro)
    }

    /// Finds a pomodoro by ID, scoped to its owner
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let pomodoro = sqlx::query_as::<_, Pomodoro>(
            r#"
            SELECT id, user_id, task_id, duration, completed, started_at
            FROM pomodoros
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(pomodoro)
    }

    /// Marks a pomodoro as completed
    ///
    /// Idempotent: completing an already-completed session is a no-op
    /// that still returns the row.
    ///
    /// # Returns
    ///
    /// The updated pomodoro, or None if no session with that id is owned
    /// by `user_id`
    pub async fn complete(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let pomodoro = sqlx::query_as::<_, Pomodoro>(
            r#"
            UPDATE pomodoros
            SET completed = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, task_id, duration, completed, started_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(pomodoro)
    }

    /// Counts a user's completed pomodoros started on the given UTC day
    pub async fn count_completed_on(
        pool: &PgPool,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM pomodoros
            WHERE user_id = $1
              AND completed = TRUE
              AND (started_at AT TIME ZONE 'UTC')::date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Per-day completed-session counts over an inclusive date window
    ///
    /// Returns one `(day, count)` row per day that has at least one
    /// completed session; days with none are absent and must be
    /// zero-filled by the caller. Rows are ordered oldest first.
    pub async fn daily_completed_counts(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, i64)>, sqlx::Error> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT (started_at AT TIME ZONE 'UTC')::date AS day, COUNT(*)
            FROM pomodoros
            WHERE user_id = $1
              AND completed = TRUE
              AND (started_at AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Count and total focus minutes of completed sessions in an
    /// inclusive date window
    pub async fn completed_window_totals(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WindowTotals, sqlx::Error> {
        let (count, total_minutes): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(duration), 0)
            FROM pomodoros
            WHERE user_id = $1
              AND completed = TRUE
              AND (started_at AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(WindowTotals {
            count,
            total_minutes,
        })
    }
}
