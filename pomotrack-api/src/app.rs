/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use pomotrack_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = pomotrack_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use pomotrack_shared::auth::middleware::session_auth_middleware;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /v1/                           # API v1 (versioned)
///     ├── /auth/                     # Authentication (public)
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /logout
///     ├── /tasks/                    # Task management (session required)
///     │   ├── GET    /               # List with filters
///     │   ├── POST   /               # Create
///     │   ├── PUT    /:id            # Full replace
///     │   ├── POST   /:id/toggle     # Flip completion
///     │   └── DELETE /:id            # Delete
///     ├── /pomodoros/                # Focus sessions (session required)
///     │   ├── POST /                 # Start
///     │   └── POST /:id/complete     # Complete
///     ├── /stats/                    # Statistics (session required)
///     │   ├── GET /summary           # Aggregate stats
///     │   └── GET /daily             # Raw daily-count series
///     └── /dashboard                 # Dashboard summary (session required)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session guard (protected route groups only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    // Task routes (require a valid session)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id/toggle", post(routes::tasks::toggle_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Pomodoro routes (require a valid session)
    let pomodoro_routes = Router::new()
        .route("/", post(routes::pomodoros::start_pomodoro))
        .route("/:id/complete", post(routes::pomodoros::complete_pomodoro))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Stats routes (require a valid session)
    let stats_routes = Router::new()
        .route("/summary", get(routes::stats::stats_summary))
        .route("/daily", get(routes::stats::stats_daily))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Dashboard (requires a valid session)
    let dashboard_routes = Router::new()
        .route("/", get(routes::dashboard::dashboard))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/pomodoros", pomodoro_routes)
        .nest("/stats", stats_routes)
        .nest("/dashboard", dashboard_routes);

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Delegates to the shared session guard with this deployment's signing
/// secret; failures are translated to the API's JSON error shape.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    session_auth_middleware(state.session_secret().to_string(), req, next)
        .await
        .map_err(crate::error::ApiError::from)
}
