//! Attendance service: student roster and daily marks.
//!
//! DESIGN
//! ======
//! One row per (student, date). Marking is an upsert, so re-marking a day
//! overwrites the earlier status and stamps the marking user. Daily summaries
//! count unmarked students against the full roster.

use std::collections::HashMap;

use attendance_client::net::types::{AttendanceRecord, AttendanceStatus, DailySummary, Student};
use attendance_client::util::clock::format_iso_date;
use sqlx::{PgPool, Row};
use time::Date;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("student not found: {0}")]
    StudentNotFound(Uuid),
    #[error("A student with roll number {0} already exists")]
    DuplicateRollNumber(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Trimmed, non-empty fields for a new student.
///
/// # Errors
///
/// Returns [`AttendanceError::MissingField`] naming the first blank field.
pub fn validate_student(name: &str, roll_number: &str, class_name: &str) -> Result<(String, String, String), AttendanceError> {
    let name = name.trim();
    let roll_number = roll_number.trim();
    let class_name = class_name.trim();
    if name.is_empty() {
        return Err(AttendanceError::MissingField("name"));
    }
    if roll_number.is_empty() {
        return Err(AttendanceError::MissingField("roll_number"));
    }
    if class_name.is_empty() {
        return Err(AttendanceError::MissingField("class_name"));
    }
    Ok((name.to_owned(), roll_number.to_owned(), class_name.to_owned()))
}

fn student_from_row(row: &sqlx::postgres::PgRow) -> Student {
    let id: Uuid = row.get("id");
    Student {
        id: id.to_string(),
        name: row.get("name"),
        roll_number: row.get("roll_number"),
        class_name: row.get("class_name"),
    }
}

/// List students ordered by class then roll number, optionally for one class.
pub async fn list_students(pool: &PgPool, class_name: Option<&str>) -> Result<Vec<Student>, AttendanceError> {
    let rows = sqlx::query(
        r"SELECT id, name, roll_number, class_name
          FROM students
          WHERE $1::text IS NULL OR class_name = $1
          ORDER BY class_name, roll_number",
    )
    .bind(class_name)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(student_from_row).collect())
}

pub async fn create_student(
    pool: &PgPool,
    name: &str,
    roll_number: &str,
    class_name: &str,
) -> Result<Student, AttendanceError> {
    let (name, roll_number, class_name) = validate_student(name, roll_number, class_name)?;
    let row = sqlx::query(
        r"INSERT INTO students (name, roll_number, class_name)
          VALUES ($1, $2, $3)
          RETURNING id, name, roll_number, class_name",
    )
    .bind(&name)
    .bind(&roll_number)
    .bind(&class_name)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AttendanceError::DuplicateRollNumber(roll_number.clone()),
        _ => AttendanceError::Database(e),
    })?;
    Ok(student_from_row(&row))
}

pub async fn delete_student(pool: &PgPool, student_id: Uuid) -> Result<(), AttendanceError> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(student_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AttendanceError::StudentNotFound(student_id));
    }
    Ok(())
}

fn record_from_row(row: &sqlx::postgres::PgRow) -> AttendanceRecord {
    let student_id: Uuid = row.get("student_id");
    let date: Date = row.get("date");
    let status: String = row.get("status");
    let marked_by: Option<Uuid> = row.get("marked_by");
    AttendanceRecord {
        student_id: student_id.to_string(),
        student_name: row.get("student_name"),
        date: format_iso_date(date),
        // The table CHECK constraint limits status to known values.
        status: AttendanceStatus::parse(&status).unwrap_or(AttendanceStatus::Absent),
        note: row.get("note"),
        marked_by: marked_by.map(|id| id.to_string()),
    }
}

/// All marks recorded for one day.
pub async fn list_records(pool: &PgPool, date: Date) -> Result<Vec<AttendanceRecord>, AttendanceError> {
    let rows = sqlx::query(
        r"SELECT a.student_id, s.name AS student_name, a.date, a.status, a.note, a.marked_by
          FROM attendance_records a
          JOIN students s ON s.id = a.student_id
          WHERE a.date = $1
          ORDER BY s.class_name, s.roll_number",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(record_from_row).collect())
}

/// Insert or overwrite the mark for (student, date).
pub async fn mark(
    pool: &PgPool,
    student_id: Uuid,
    date: Date,
    status: AttendanceStatus,
    note: Option<&str>,
    marked_by: Uuid,
) -> Result<AttendanceRecord, AttendanceError> {
    let note = note.map(str::trim).filter(|n| !n.is_empty());
    let row = sqlx::query(
        r"WITH upserted AS (
              INSERT INTO attendance_records (student_id, date, status, note, marked_by)
              SELECT id, $2, $3, $4, $5 FROM students WHERE id = $1
              ON CONFLICT (student_id, date) DO UPDATE
                  SET status = EXCLUDED.status,
                      note = EXCLUDED.note,
                      marked_by = EXCLUDED.marked_by,
                      updated_at = now()
              RETURNING student_id, date, status, note, marked_by
          )
          SELECT u.student_id, s.name AS student_name, u.date, u.status, u.note, u.marked_by
          FROM upserted u
          JOIN students s ON s.id = u.student_id",
    )
    .bind(student_id)
    .bind(date)
    .bind(status.as_str())
    .bind(note)
    .bind(marked_by)
    .fetch_optional(pool)
    .await?
    .ok_or(AttendanceError::StudentNotFound(student_id))?;
    Ok(record_from_row(&row))
}

/// Fold per-status counts into a summary against the roster size.
#[must_use]
pub fn summarize(date: Date, total_students: i64, counts: &HashMap<AttendanceStatus, i64>) -> DailySummary {
    let count = |status| counts.get(&status).copied().unwrap_or(0);
    let present = count(AttendanceStatus::Present);
    let absent = count(AttendanceStatus::Absent);
    let late = count(AttendanceStatus::Late);
    let excused = count(AttendanceStatus::Excused);
    DailySummary {
        date: format_iso_date(date),
        total_students,
        present,
        absent,
        late,
        excused,
        unmarked: (total_students - present - absent - late - excused).max(0),
    }
}

pub async fn daily_summary(pool: &PgPool, date: Date) -> Result<DailySummary, AttendanceError> {
    let total_students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query("SELECT status, COUNT(*) AS cnt FROM attendance_records WHERE date = $1 GROUP BY status")
        .bind(date)
        .fetch_all(pool)
        .await?;

    let counts: HashMap<AttendanceStatus, i64> = rows
        .iter()
        .filter_map(|r| {
            let status: String = r.get("status");
            AttendanceStatus::parse(&status).map(|s| (s, r.get::<i64, _>("cnt")))
        })
        .collect();

    Ok(summarize(date, total_students, &counts))
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
