/// Authentication utilities
///
/// This module provides the authentication primitives for Pomotrack:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the registration policy
/// - [`jwt`]: Signed session token generation and validation
/// - [`middleware`]: Session guard for protected routes
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: Password verification uses constant-time operations
///
/// # Example
///
/// ```no_run
/// use pomotrack_shared::auth::password::{hash_password, verify_password};
/// use pomotrack_shared::auth::jwt::{create_session_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token generation
/// let claims = SessionClaims::new(Uuid::new_v4(), "alice".to_string());
/// let token = create_session_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
