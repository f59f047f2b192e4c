/// Productivity statistics endpoints
///
/// Two read-only views over completed pomodoros and task counts:
///
/// - `GET /v1/stats/summary?date=` - Rendered aggregate stats: today and
///   trailing-week counters, focus-time totals, task counters, and the
///   daily breakdown
/// - `GET /v1/stats/daily?date=&days=` - The raw daily-count series for
///   charting
///
/// The reference date defaults to today (UTC) and can be overridden with
/// a `YYYY-MM-DD` query parameter; both endpoints have no side effects.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, Utc};
use pomotrack_shared::{
    auth::middleware::AuthContext,
    models::{pomodoro::Pomodoro, task::Task},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Days in the trailing summary window (today plus the six before it)
const WEEK_WINDOW_DAYS: i64 = 7;

/// Maximum length of the raw daily series
const MAX_SERIES_DAYS: i64 = 31;

/// Query parameters shared by the stats endpoints
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    /// Reference date as `YYYY-MM-DD` (default: today UTC)
    pub date: Option<String>,

    /// Number of days in the daily series (default: 7, max: 31)
    pub days: Option<i64>,
}

/// One day of the daily breakdown
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    /// Calendar date
    pub date: NaiveDate,

    /// Short display label, e.g. "Mon 05"
    pub label: String,

    /// Completed pomodoros started that day
    pub count: i64,
}

/// Aggregate statistics response
#[derive(Debug, Serialize)]
pub struct StatsSummaryResponse {
    /// Completed pomodoros started on the reference date
    pub today_count: i64,

    /// Completed pomodoros in the trailing 7-day window
    pub week_count: i64,

    /// Total focus minutes in the trailing 7-day window
    pub total_focus_minutes: i64,

    /// Focus time split for display: whole hours
    pub focus_hours: i64,

    /// Focus time split for display: leftover minutes
    pub focus_minutes: i64,

    /// All tasks owned by the user
    pub total_tasks: i64,

    /// Completed tasks
    pub completed_tasks: i64,

    /// Pending tasks (total - completed)
    pub pending_tasks: i64,

    /// Daily breakdown over the window, oldest first
    pub daily: Vec<DailyCount>,
}

/// Parses the reference date parameter, defaulting to today (UTC)
fn parse_reference_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
    match date {
        None => Ok(Utc::now().date_naive()),
        Some(s) if s.is_empty() => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            ApiError::ValidationError(vec![ValidationErrorDetail::new(
                "date",
                "Invalid date format",
            )])
        }),
    }
}

/// Builds the window of `num_days` consecutive days ending at
/// `reference`, oldest first
fn window_days(reference: NaiveDate, num_days: i64) -> Vec<NaiveDate> {
    (0..num_days)
        .map(|i| reference - Duration::days(num_days - 1 - i))
        .collect()
}

/// Zero-fills the grouped per-day counts into a dense series
fn build_daily_series(days: &[NaiveDate], rows: &[(NaiveDate, i64)]) -> Vec<DailyCount> {
    let counts: HashMap<NaiveDate, i64> = rows.iter().copied().collect();

    days.iter()
        .map(|day| DailyCount {
            date: *day,
            label: day.format("%a %d").to_string(),
            count: counts.get(day).copied().unwrap_or(0),
        })
        .collect()
}

/// Aggregate statistics for the stats page
pub async fn stats_summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<StatsSummaryResponse>> {
    let reference = parse_reference_date(query.date.as_deref())?;
    let window_start = reference - Duration::days(WEEK_WINDOW_DAYS - 1);

    let today_count = Pomodoro::count_completed_on(&state.db, auth.user_id, reference).await?;

    let totals =
        Pomodoro::completed_window_totals(&state.db, auth.user_id, window_start, reference).await?;

    let rows =
        Pomodoro::daily_completed_counts(&state.db, auth.user_id, window_start, reference).await?;
    let daily = build_daily_series(&window_days(reference, WEEK_WINDOW_DAYS), &rows);

    let (total_tasks, completed_tasks) = Task::count_by_user(&state.db, auth.user_id).await?;

    Ok(Json(StatsSummaryResponse {
        today_count,
        week_count: totals.count,
        total_focus_minutes: totals.total_minutes,
        focus_hours: totals.total_minutes / 60,
        focus_minutes: totals.total_minutes % 60,
        total_tasks,
        completed_tasks,
        pending_tasks: total_tasks - completed_tasks,
        daily,
    }))
}

/// Raw daily-count series for charting
pub async fn stats_daily(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<Vec<DailyCount>>> {
    let reference = parse_reference_date(query.date.as_deref())?;

    let num_days = query.days.unwrap_or(WEEK_WINDOW_DAYS);
    if !(1..=MAX_SERIES_DAYS).contains(&num_days) {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "days",
            format!("Days must be between 1 and {}", MAX_SERIES_DAYS),
        )]));
    }

    let window_start = reference - Duration::days(num_days - 1);

    let rows =
        Pomodoro::daily_completed_counts(&state.db, auth.user_id, window_start, reference).await?;
    let daily = build_daily_series(&window_days(reference, num_days), &rows);

    Ok(Json(daily))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_reference_date_valid() {
        assert_eq!(
            parse_reference_date(Some("2025-01-05")).unwrap(),
            date(2025, 1, 5)
        );
    }

    #[test]
    fn test_parse_reference_date_defaults_to_today() {
        assert_eq!(parse_reference_date(None).unwrap(), Utc::now().date_naive());
        assert_eq!(
            parse_reference_date(Some("")).unwrap(),
            Utc::now().date_naive()
        );
    }

    #[test]
    fn test_parse_reference_date_rejects_bad_format() {
        assert!(parse_reference_date(Some("05/01/2025")).is_err());
        assert!(parse_reference_date(Some("2025-1-5-x")).is_err());
    }

    #[test]
    fn test_window_days_oldest_first() {
        let days = window_days(date(2025, 1, 7), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 1, 1));
        assert_eq!(days[6], date(2025, 1, 7));
    }

    #[test]
    fn test_window_days_crosses_month_boundary() {
        let days = window_days(date(2025, 3, 2), 7);
        assert_eq!(days[0], date(2025, 2, 24));
        assert_eq!(days[6], date(2025, 3, 2));
    }

    #[test]
    fn test_build_daily_series_zero_fills() {
        let days = window_days(date(2025, 1, 7), 7);
        let rows = vec![(date(2025, 1, 3), 2), (date(2025, 1, 7), 1)];

        let series = build_daily_series(&days, &rows);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].count, 0);
        assert_eq!(series[2].count, 2);
        assert_eq!(series[6].count, 1);
    }

    #[test]
    fn test_build_daily_series_labels() {
        // 2025-01-06 was a Monday
        let days = vec![date(2025, 1, 6)];
        let series = build_daily_series(&days, &[]);

        assert_eq!(series[0].label, "Mon 06");
    }
}
