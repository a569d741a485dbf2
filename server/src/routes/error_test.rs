use super::*;
use uuid::Uuid;

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn into_response_wraps_message_in_error_field() {
    let response = ApiError::bad_request("Name is required").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "Name is required" }));
}

#[test]
fn auth_validation_errors_are_400() {
    for err in [AuthError::MissingName, AuthError::InvalidEmail, AuthError::WeakPassword(8)] {
        assert_eq!(ApiError::from(err).status, StatusCode::BAD_REQUEST);
    }
}

#[test]
fn invalid_credentials_is_401_with_wire_text() {
    let api = ApiError::from(AuthError::InvalidCredentials);
    assert_eq!(api.status, StatusCode::UNAUTHORIZED);
    assert_eq!(api.message, "Invalid credentials");
}

#[test]
fn email_taken_is_409() {
    assert_eq!(ApiError::from(AuthError::EmailTaken).status, StatusCode::CONFLICT);
}

#[test]
fn database_errors_hide_detail() {
    let api = ApiError::from(AuthError::Db(sqlx::Error::PoolTimedOut));
    assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(api.message, INTERNAL_ERROR_MESSAGE);

    let api = ApiError::from(AttendanceError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(api.message, INTERNAL_ERROR_MESSAGE);
}

#[test]
fn attendance_errors_map_to_statuses() {
    assert_eq!(ApiError::from(AttendanceError::StudentNotFound(Uuid::nil())).status, StatusCode::NOT_FOUND);
    assert_eq!(ApiError::from(AttendanceError::DuplicateRollNumber("1".into())).status, StatusCode::CONFLICT);
    assert_eq!(ApiError::from(AttendanceError::MissingField("name")).status, StatusCode::BAD_REQUEST);
}

#[test]
fn rate_limit_is_429() {
    let api = ApiError::from(RateLimitError::TooManyAttempts { limit: 10, window_secs: 300 });
    assert_eq!(api.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(api.message, "Too many login attempts, try again later");
}
