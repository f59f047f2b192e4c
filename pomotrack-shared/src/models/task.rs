/// Task model and database operations
///
/// This module provides the Task model: a to-do item with priority,
/// optional deadline, and a completion flag. Every operation is scoped to
/// the owning user in the SQL predicate itself.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     deadline DATE,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pomotrack_shared::models::task::{CreateTask, Task, TaskPriority};
/// use pomotrack_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: Uuid::new_v4(),
///     title: "Write report".to_string(),
///     description: String::new(),
///     priority: TaskPriority::High,
///     deadline: None,
/// }).await?;
///
/// // Flip completion state
/// Task::toggle(&pool, task.id, task.user_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can wait
    Low,

    /// Default urgency
    Medium,

    /// Do this first
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    /// Converts priority to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Completion-status filter for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Only incomplete tasks
    Pending,

    /// Only completed tasks
    Completed,

    /// No status filtering
    All,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::Pending
    }
}

impl StatusFilter {
    /// Maps the filter to the `completed` value to match, if any
    pub fn as_completed(&self) -> Option<bool> {
        match self {
            StatusFilter::Pending => Some(false),
            StatusFilter::Completed => Some(true),
            StatusFilter::All => None,
        }
    }
}

/// Priority filter for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    /// Only low-priority tasks
    Low,

    /// Only medium-priority tasks
    Medium,

    /// Only high-priority tasks
    High,

    /// No priority filtering
    All,
}

impl Default for PriorityFilter {
    fn default() -> Self {
        PriorityFilter::All
    }
}

impl PriorityFilter {
    /// Maps the filter to the priority to match, if any
    pub fn as_priority(&self) -> Option<TaskPriority> {
        match self {
            PriorityFilter::Low => Some(TaskPriority::Low),
            PriorityFilter::Medium => Some(TaskPriority::Medium),
            PriorityFilter::High => Some(TaskPriority::High),
            PriorityFilter::All => None,
        }
    }
}

/// Task model representing a to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user (immutable after creation)
    pub user_id: Uuid,

    /// Task title (non-empty after trimming)
    pub title: String,

    /// Free-text description (empty string when unset)
    pub description: String,

    /// Priority level
    pub priority: TaskPriority,

    /// Optional deadline (calendar date, no time component)
    pub deadline: Option<NaiveDate>,

    /// Whether the task is done
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Description (empty string when unset)
    pub description: String,

    /// Priority level
    pub priority: TaskPriority,

    /// Optional deadline
    pub deadline: Option<NaiveDate>,
}

/// Input for updating an existing task
///
/// All mutable fields are replaced as a whole; this is a full replace,
/// not a partial merge.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New priority
    pub priority: TaskPriority,

    /// New deadline (None clears it)
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, priority, deadline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, priority, deadline, completed, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.deadline)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owner
    ///
    /// This is the only lookup the API uses: a task belonging to another
    /// user is indistinguishable from a missing one.
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, priority, deadline, completed, created_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks with optional status and priority filters
    ///
    /// Ordering: incomplete before complete, then ascending deadline with
    /// null deadlines last, then newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        completed: Option<bool>,
        priority: Option<TaskPriority>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, priority, deadline, completed, created_at
            FROM tasks
            WHERE user_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
              AND ($3::task_priority IS NULL OR priority = $3)
            ORDER BY completed ASC, deadline ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(completed)
        .bind(priority)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a user's pending tasks for the dashboard
    ///
    /// Ordered by ascending deadline (nulls last), then newest first.
    pub async fn list_pending_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, priority, deadline, completed, created_at
            FROM tasks
            WHERE user_id = $1 AND completed = FALSE
            ORDER BY deadline ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Replaces all mutable fields of a task
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task with that id is owned by `user_id`
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3,
                description = $4,
                priority = $5,
                deadline = $6
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, priority, deadline, completed, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.deadline)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Flips the completion flag
    ///
    /// The flip happens in a single atomic UPDATE, so two concurrent
    /// toggles still leave the flag in a consistent state.
    ///
    /// # Returns
    ///
    /// The updated task (with the new `completed` value), or None if no
    /// task with that id is owned by `user_id`
    pub async fn toggle(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = NOT completed
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, priority, deadline, completed, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Permanently deletes a task
    ///
    /// Linked pomodoros survive; the store nulls their `task_id`.
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false if none was owned by `user_id`
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts a user's tasks: (total, completed)
    pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE completed)
            FROM tasks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }

    /// Counts a user's completed tasks created on the given UTC day
    pub async fn count_completed_created_on(
        pool: &PgPool,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE user_id = $1
              AND completed = TRUE
              AND (created_at AT TIME ZONE 'UTC')::date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&TaskPriority::High).unwrap();
        assert_eq!(json, "\"high\"");

        let parsed: TaskPriority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, TaskPriority::Low);
    }

    #[test]
    fn test_status_filter_as_completed() {
        assert_eq!(StatusFilter::Pending.as_completed(), Some(false));
        assert_eq!(StatusFilter::Completed.as_completed(), Some(true));
        assert_eq!(StatusFilter::All.as_completed(), None);
    }

    #[test]
    fn test_status_filter_default_is_pending() {
        assert_eq!(StatusFilter::default(), StatusFilter::Pending);
    }

    #[test]
    fn test_priority_filter_as_priority() {
        assert_eq!(PriorityFilter::Low.as_priority(), Some(TaskPriority::Low));
        assert_eq!(
            PriorityFilter::Medium.as_priority(),
            Some(TaskPriority::Medium)
        );
        assert_eq!(PriorityFilter::High.as_priority(), Some(TaskPriority::High));
        assert_eq!(PriorityFilter::All.as_priority(), None);
    }

    #[test]
    fn test_priority_filter_default_is_all() {
        assert_eq!(PriorityFilter::default(), PriorityFilter::All);
    }

    #[test]
    fn test_filter_deserialization_rejects_unknown() {
        let parsed: Result<StatusFilter, _> = serde_json::from_str("\"archived\"");
        assert!(parsed.is_err());

        let parsed: Result<PriorityFilter, _> = serde_json::from_str("\"urgent\"");
        assert!(parsed.is_err());
    }
}
