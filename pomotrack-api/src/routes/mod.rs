/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, logout)
/// - `tasks`: Task CRUD, toggle, and filtered listing
/// - `pomodoros`: Focus session start/complete
/// - `stats`: Productivity statistics
/// - `dashboard`: Dashboard summary

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod pomodoros;
pub mod stats;
pub mod tasks;
