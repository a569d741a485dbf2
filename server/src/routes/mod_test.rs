use super::test_helpers::*;
use axum::http::{StatusCode, header};

#[tokio::test]
async fn healthz_is_ok() {
    let response = send(test_router(), get("/healthz", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_path_redirects_to_root() {
    let response = send(test_router(), get("/login", None)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = send(test_router(), get("/api/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
