//! Student roster and attendance marking routes.
//!
//! All routes require a session. Roster changes are admin-only; any
//! authenticated user may read the roster and mark attendance.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use attendance_client::net::types::{AttendanceRecord, AttendanceStatus, DailySummary, MarkAttendance, NewStudent, Student};
use attendance_client::util::clock::{self, parse_iso_date};
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use super::auth::{AuthUser, json_body};
use super::error::ApiError;
use crate::services::attendance as attendance_svc;
use crate::state::AppState;

/// Parse an optional `YYYY-MM-DD` value, defaulting to today.
pub(crate) fn resolve_date(raw: Option<&str>) -> Result<Date, ApiError> {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_iso_date(raw).ok_or_else(|| ApiError::bad_request(format!("Invalid date: {raw}"))),
        None => Ok(clock::now().date()),
    }
}

fn parse_student_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid student id: {raw}")))
}

// =============================================================================
// STUDENTS
// =============================================================================

#[derive(Deserialize)]
pub struct StudentsQuery {
    pub class_name: Option<String>,
}

/// `GET /api/students`
pub async fn list_students(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<StudentsQuery>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let class_name = query.class_name.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let students = attendance_svc::list_students(&state.pool, class_name).await?;
    Ok(Json(students))
}

/// `POST /api/students` — admin only.
pub async fn create_student(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewStudent>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_admin()?;
    let body = json_body(body)?;
    let student = attendance_svc::create_student(&state.pool, &body.name, &body.roll_number, &body.class_name).await?;
    tracing::info!(student_id = %student.id, by = %auth.user.id, "student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// `DELETE /api/students/{id}` — admin only.
pub async fn delete_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    auth.require_admin()?;
    let student_id = parse_student_id(&id)?;
    attendance_svc::delete_student(&state.pool, student_id).await?;
    tracing::info!(%student_id, by = %auth.user.id, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// ATTENDANCE
// =============================================================================

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `GET /api/attendance?date=YYYY-MM-DD`
pub async fn list_records(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
    let date = resolve_date(query.date.as_deref())?;
    Ok(Json(attendance_svc::list_records(&state.pool, date).await?))
}

/// `PUT /api/attendance` — upsert one student's mark for a day.
pub async fn mark(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<MarkAttendance>, JsonRejection>,
) -> Result<Json<AttendanceRecord>, ApiError> {
    let body = json_body(body)?;
    let student_id = parse_student_id(&body.student_id)?;
    let date = resolve_date(body.date.as_deref())?;
    let status: AttendanceStatus = body.status;
    let record =
        attendance_svc::mark(&state.pool, student_id, date, status, body.note.as_deref(), auth.user.id).await?;
    tracing::debug!(%student_id, status = status.as_str(), "attendance marked");
    Ok(Json(record))
}

/// `GET /api/attendance/summary?date=YYYY-MM-DD`
pub async fn summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let date = resolve_date(query.date.as_deref())?;
    Ok(Json(attendance_svc::daily_summary(&state.pool, date).await?))
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
