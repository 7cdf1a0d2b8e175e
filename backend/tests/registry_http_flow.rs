//! End-to-end HTTP scenarios over the in-memory store.
//!
//! These drive the fully wired application (routes, extractor error handlers,
//! trace middleware, real domain services) through `actix_web::test`.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use registry::domain::TRACE_ID_HEADER;
use registry::test_support::{InMemoryRegistryStore, test_app};
use serde_json::{Value, json};

#[actix_web::test]
async fn register_create_read_delete_round_trip() {
    let store = Arc::new(InMemoryRegistryStore::default());
    let app = actix_test::init_service(test_app(store.clone())).await;

    let register = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "a@x.com", "password": "password123" }))
        .to_request();
    let account: Value = actix_test::call_and_read_body_json(&app, register).await;
    assert_eq!(
        account,
        json!({ "id": 1, "email": "a@x.com", "isActive": true, "items": [] })
    );

    let create = actix_test::TestRequest::post()
        .uri("/users/1/items")
        .set_json(json!({ "title": "Clean Code", "category": "Martin", "price": 29.99 }))
        .to_request();
    let item: Value = actix_test::call_and_read_body_json(&app, create).await;
    assert_eq!(item["id"], 1);
    assert_eq!(item["ownerId"], 1);
    assert_eq!(item["title"], "Clean Code");
    assert_eq!(item["category"], "Martin");
    assert_eq!(item["price"], 29.99);
    assert!(item["createdAt"].is_string());

    let get_account = actix_test::TestRequest::get().uri("/users/1").to_request();
    let account: Value = actix_test::call_and_read_body_json(&app, get_account).await;
    assert_eq!(account["items"], json!([item.clone()]));

    let delete_item = actix_test::TestRequest::delete().uri("/items/1").to_request();
    let deleted: Value = actix_test::call_and_read_body_json(&app, delete_item).await;
    assert_eq!(deleted, json!({ "message": "Item deleted successfully" }));

    let get_item = actix_test::TestRequest::get().uri("/items/1").to_request();
    let response = actix_test::call_service(&app, get_item).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header_trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["code"], "not_found");
    assert_eq!(error["detail"], "Item not found");
    assert_eq!(error["traceId"], header_trace);

    let account = actix_test::TestRequest::get().uri("/users/1").to_request();
    let account: Value = actix_test::call_and_read_body_json(&app, account).await;
    assert_eq!(account["items"], json!([]));
}

#[actix_web::test]
async fn account_deletion_removes_items_from_listing() {
    let store = Arc::new(InMemoryRegistryStore::default());
    let app = actix_test::init_service(test_app(store.clone())).await;
    for email in ["a@x.com", "b@x.com"] {
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": email, "password": "password123" }))
            .to_request();
        actix_test::call_service(&app, request).await;
    }
    for owner in [1, 1, 2] {
        let request = actix_test::TestRequest::post()
            .uri(&format!("/users/{owner}/items"))
            .set_json(json!({ "title": "Book", "category": "Anon", "price": 1.5 }))
            .to_request();
        actix_test::call_service(&app, request).await;
    }

    let delete = actix_test::TestRequest::delete().uri("/users/1").to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = actix_test::TestRequest::get().uri("/items").to_request();
    let items: Vec<Value> = actix_test::call_and_read_body_json(&app, list).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ownerId"], 2);
}

#[actix_web::test]
async fn health_and_banner_answer_without_readiness() {
    let app = actix_test::init_service(test_app(Arc::new(InMemoryRegistryStore::default()))).await;

    let health = actix_test::TestRequest::get().uri("/health").to_request();
    let report: Value = actix_test::call_and_read_body_json(&app, health).await;
    assert_eq!(report["status"], "UP");

    let ready = actix_test::TestRequest::get().uri("/health/ready").to_request();
    let response = actix_test::call_service(&app, ready).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let banner = actix_test::TestRequest::get().uri("/").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, banner).await;
    assert!(body["message"].is_string());
}
