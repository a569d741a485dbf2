use super::*;
use crate::routes::test_helpers::*;
use axum::body::Body;
use axum::http::{Request, header};
use serde_json::json;

#[test]
fn resolve_date_parses_iso() {
    assert_eq!(resolve_date(Some("2026-10-17")).unwrap(), time::macros::date!(2026 - 10 - 17));
}

#[test]
fn resolve_date_defaults_to_today() {
    assert_eq!(resolve_date(None).unwrap(), clock::now().date());
    assert_eq!(resolve_date(Some("  ")).unwrap(), clock::now().date());
}

#[test]
fn resolve_date_rejects_garbage() {
    let err = resolve_date(Some("17/10/2026")).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Invalid date: 17/10/2026");
}

#[test]
fn parse_student_id_rejects_non_uuid() {
    assert_eq!(parse_student_id("42").unwrap_err().status, StatusCode::BAD_REQUEST);
    assert_eq!(parse_student_id("00000000-0000-0000-0000-000000000000").unwrap(), Uuid::nil());
}

#[tokio::test]
async fn roster_routes_require_session() {
    for uri in ["/api/students", "/api/attendance", "/api/attendance/summary?date=2026-10-17"] {
        let response = send(test_router(), get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn create_student_requires_session() {
    let body = json!({"name": "Ravi", "roll_number": "7A-1", "class_name": "7A"});
    let response = send(test_router(), post_json("/api/students", &body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mark_requires_session() {
    let request = Request::put("/api/attendance")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"student_id": Uuid::nil(), "status": "present"}).to_string()))
        .unwrap();
    let response = send(test_router(), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_student_requires_session() {
    let request = Request::delete("/api/students/00000000-0000-0000-0000-000000000000")
        .body(Body::empty())
        .unwrap();
    let response = send(test_router(), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
