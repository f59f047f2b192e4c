/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation with a real password hash
/// - Session token generation
/// - Request/response helpers
///
/// Integration tests need a live PostgreSQL instance; they skip with a
/// note when `DATABASE_URL` is unset so the unit suite stays green.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use pomotrack_api::app::{build_router, AppState};
use pomotrack_api::config::Config;
use pomotrack_shared::auth::jwt::{create_session_token, SessionClaims};
use pomotrack_shared::auth::password::hash_password;
use pomotrack_shared::db::migrations::run_migrations;
use pomotrack_shared::models::task::{CreateTask, Task, TaskPriority};
use pomotrack_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Password used for every seeded test user
pub const TEST_PASSWORD: &str = "password123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub session_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so callers can skip.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        if std::env::var("DATABASE_URL").is_err() {
            return Ok(None);
        }

        // Tests don't need a real secret, just a stable one
        if std::env::var("SESSION_SECRET").is_err() {
            std::env::set_var(
                "SESSION_SECRET",
                "integration-test-secret-0123456789abcdef",
            );
        }

        let config = Config::from_env()?;

        // Connect to database and apply schema
        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        // Create test user with a real hash so login works end to end
        let user = User::create(
            &db,
            CreateUser {
                username: format!("test-{}", Uuid::new_v4()),
                password_hash: hash_password(TEST_PASSWORD)?,
            },
        )
        .await?;

        // Generate session token
        let claims = SessionClaims::new(user.id, user.username.clone());
        let session_token = create_session_token(&claims, &config.session.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Some(TestContext {
            db,
            app,
            config,
            user,
            session_token,
        }))
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.session_token)
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Delete test user (cascades to tasks and pomodoros)
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Builds an authenticated JSON request
pub fn json_request(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds an authenticated request with no body
pub fn empty_request(ctx: &TestContext, method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap()
}

/// Parses a response body as JSON
pub async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Helper to create a test task directly in the database
pub async fn create_test_task(
    ctx: &TestContext,
    title: &str,
    deadline: Option<chrono::NaiveDate>,
) -> anyhow::Result<Task> {
    let task = Task::create(
        &ctx.db,
        CreateTask {
            user_id: ctx.user.id,
            title: title.to_string(),
            description: String::new(),
            priority: TaskPriority::Medium,
            deadline,
        },
    )
    .await?;

    Ok(task)
}

/// Counts pomodoro rows owned by the context user
pub async fn count_pomodoros(ctx: &TestContext) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pomodoros WHERE user_id = $1")
        .bind(ctx.user.id)
        .fetch_one(&ctx.db)
        .await?;
    Ok(count)
}
