use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use http_body_util::BodyExt;
use serde_json::json;

use super::error::{ApiError, ErrorFormat};
use super::middleware::envelope_errors;

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn status_codes_follow_error_kind() {
    assert_eq!(
        ApiError::MissingCredential.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(ApiError::missing("taskId").status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::remote("Failed to fetch tasks").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
}

#[test]
fn messages_match_wire_text() {
    assert_eq!(
        ApiError::MissingCredential.to_string(),
        "TODOIST_API_TOKEN is not set"
    );
    assert_eq!(ApiError::missing("labelId").to_string(), "labelId is required");
    assert_eq!(ApiError::NotFound.to_string(), "Not Found");
}

#[tokio::test]
async fn renders_as_plain_text() {
    let response = ApiError::missing("taskId").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(body_text(response).await, "taskId is required");
}

#[test]
fn envelope_carries_kind_and_message() {
    let envelope = serde_json::to_value(ApiError::remote("Failed to fetch task").envelope()).unwrap();
    assert_eq!(
        envelope,
        json!({ "error": { "kind": "remote", "message": "Failed to fetch task" } })
    );
}

#[tokio::test]
async fn envelope_middleware_rewrites_error_responses() {
    let response = envelope_errors(ApiError::NotFound.into_response()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "error": { "kind": "not_found", "message": "Not Found" } })
    );
}

#[tokio::test]
async fn envelope_middleware_leaves_success_alone() {
    let response = envelope_errors((StatusCode::OK, "fine").into_response()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "fine");
}

#[test]
fn error_format_parses_names() {
    assert_eq!(ErrorFormat::parse("plain"), Some(ErrorFormat::Plain));
    assert_eq!(ErrorFormat::parse("Envelope"), Some(ErrorFormat::Envelope));
    assert_eq!(ErrorFormat::parse("json"), None);
    assert_eq!(ErrorFormat::default(), ErrorFormat::Plain);
}
