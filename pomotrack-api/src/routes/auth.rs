/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Logout
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/login` - Login and get a session token
/// - `POST /v1/auth/logout` - End the session

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use pomotrack_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Identical for unknown-username and wrong-password, so responses
/// cannot be used to enumerate usernames.
const LOGIN_FAILED: &str = "Invalid username or password";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired login name
    #[validate(length(max = 80, message = "Username must be at most 80 characters"))]
    pub username: String,

    /// Password (minimum length checked against the registration policy)
    pub password: String,

    /// Password confirmation (must match `password`)
    pub confirmation: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user ID
    pub user_id: Uuid,

    /// Registered username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: Uuid,

    /// Display name
    pub username: String,

    /// Signed session token (carry as `Authorization: Bearer <token>`)
    pub session_token: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Confirmation message
    pub message: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "password123",
///   "confirmation": "password123"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty username, password shorter than 6
///   characters, or password/confirmation mismatch
/// - `409 Conflict`: username already exists
/// - `500 Internal Server Error`: server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    // Validate request
    req.validate().map_err(ApiError::from)?;

    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "username",
            "Username is required",
        )]));
    }

    // Registration password policy
    password::validate_password_policy(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail::new("password", e)])
    })?;

    if req.password != req.confirmation {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "confirmation",
            "Passwords do not match",
        )]));
    }

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Create user; a duplicate username surfaces as 409 via the
    // unique-constraint mapping in error.rs
    let user = User::create(
        &state.db,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(Json(RegisterResponse {
        user_id: user.id,
        username: user.username,
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a signed session token bound to the
/// user's id and display name.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "password123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials (same message whether the
///   username exists or not)
/// - `500 Internal Server Error`: server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let username = req.username.trim();

    // Find user by username
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(LOGIN_FAILED.to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(LOGIN_FAILED.to_string()));
    }

    // Establish the session
    let claims = jwt::SessionClaims::new(user.id, user.username.clone());
    let session_token = jwt::create_session_token(&claims, state.session_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        session_token,
    }))
}

/// Logout endpoint
///
/// Unconditionally ends the session. The session is a client-held signed
/// token, so this is the explicit discard point; there are no error
/// conditions.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/logout
/// ```
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "You have been logged out".to_string(),
    })
}
