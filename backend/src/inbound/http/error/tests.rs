//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[case(Error::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::duplicate_key("taken"), StatusCode::CONFLICT)]
#[case(Error::store_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("relation \"accounts\" does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_context(json!({ "sql": "SELECT" }));

    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = body_json(response).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "detail": "Internal server error",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn not_found_keeps_its_detail() {
    let response = ResponseError::error_response(&Error::not_found("User not found"));

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let body = body_json(response).await;
    assert_eq!(body, json!({ "code": "not_found", "detail": "User not found" }));
}

#[rstest]
#[actix_web::test]
async fn validation_context_is_preserved() {
    let error = Error::validation("price must not be negative")
        .with_context(json!({ "field": "price" }));

    let body = body_json(ResponseError::error_response(&error)).await;

    assert_eq!(body["code"], "validation_failed");
    assert_eq!(body["context"]["field"], "price");
}

#[rstest]
#[actix_web::test]
async fn json_payload_rejections_become_unprocessable() {
    let req = TestRequest::default().to_http_request();
    let error = json_error_handler(JsonPayloadError::ContentType, &req);

    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["context"]["location"], "body");
}
