/// Database models for Pomotrack
///
/// This module contains all database models and their SQL operations.
/// Every task and pomodoro operation carries the owning `user_id` in the
/// query predicate itself; rows belonging to another user are never
/// fetched and then filtered.
///
/// # Models
///
/// - `user`: User accounts
/// - `task`: Tasks with priority, deadline, and completion state
/// - `pomodoro`: Timed focus sessions, optionally linked to a task
///
/// # Example
///
/// ```no_run
/// use pomotrack_shared::models::user::{CreateUser, User};
/// use pomotrack_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod pomodoro;
pub mod task;
pub mod user;
