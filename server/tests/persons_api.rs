//! HTTP-level tests for the persons API, driven through the router without a socket.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use phonebook_core::core::factory::build_app_state;
use phonebook_core::core::{create_app_state, Config};
use phonebook_core::identity::IdentityPolicy;
use phonebook_core::storage::{DocumentStore, MemoryStore, StorageType};
use phonebook_server::api::{create_app, create_router};

fn memory_app(unique_names: bool) -> Router {
    let mut config = Config::default();
    config.validation.unique_names = unique_names;
    create_router(build_app_state(MemoryStore::new(), config).unwrap())
}

fn document_app(name_min_length: usize) -> Router {
    let mut config = Config::default();
    config.storage.backend = StorageType::Document;
    config.storage.schema.name_min_length = name_min_length;
    config.identity.policy = IdentityPolicy::StoreAssigned;
    create_app(create_app_state(config).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Path segment for a serialized id, numeric or string
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(key) => key.clone(),
        other => other.to_string(),
    }
}

#[tokio::test]
async fn create_list_delete_then_not_found() {
    let app = memory_app(true);

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Ada Lovelace", "number": "39-44-5323523" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["number"], "39-44-5323523");
    assert!(created["id"].is_u64());

    let (status, listed) = send_json(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created.clone()]));

    let uri = format!("/api/persons/{}", id_segment(&created["id"]));
    let (status, fetched) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_name_or_number_is_rejected() {
    let app = memory_app(true);

    for body in [
        json!({ "name": "", "number": "040-123456" }),
        json!({ "name": "Arto Hellas" }),
        json!({}),
    ] {
        let (status, error) = send_json(&app, Method::POST, "/api/persons", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "error": "Name or number missing" }));
    }

    let (_, listed) = send_json(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn duplicate_names_rejected_only_when_guarded() {
    let person = json!({ "name": "Mary Poppendieck", "number": "39-23-6423122" });

    let guarded = memory_app(true);
    let (status, _) = send_json(&guarded, Method::POST, "/api/persons", Some(person.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, error) = send_json(&guarded, Method::POST, "/api/persons", Some(person.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("Mary Poppendieck"));

    let open = memory_app(false);
    send_json(&open, Method::POST, "/api/persons", Some(person.clone())).await;
    let (status, _) = send_json(&open, Method::POST, "/api/persons", Some(person)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = send_json(&open, Method::GET, "/api/persons", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = memory_app(true);
    let (_, created) = send_json(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Dan Abramov", "number": "12-43-234345" })),
    )
    .await;

    let uri = format!("/api/persons/{}", id_segment(&created["id"]));
    let (status, updated) = send_json(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Dan Abramov", "number": "12-43-999999" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["number"], "12-43-999999");

    let (status, error) = send_json(&app, Method::PUT, &uri, Some(json!({ "name": "Dan" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Name or number missing");
}

#[tokio::test]
async fn update_of_absent_person_creates_nothing() {
    let app = memory_app(true);

    let (status, error) = send_json(
        &app,
        Method::PUT,
        "/api/persons/424242",
        Some(json!({ "name": "Ghost", "number": "000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error["error"].is_string());

    let (_, listed) = send_json(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn deleting_twice_answers_no_content_both_times() {
    let app = memory_app(true);
    let (_, created) = send_json(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Arto Hellas", "number": "040-123456" })),
    )
    .await;
    let uri = format!("/api/persons/{}", id_segment(&created["id"]));

    let (first, _) = send(&app, Method::DELETE, &uri, None).await;
    let (second, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = memory_app(true);

    let (status, error) = send_json(&app, Method::GET, "/api/persons/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "Malformatted id: not-a-number" }));

    let (status, _) = send_json(&app, Method::DELETE, "/api/persons/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_gets_json_not_found() {
    let app = memory_app(true);

    for (method, uri) in [
        (Method::GET, "/api/people"),
        (Method::POST, "/nowhere"),
        (Method::DELETE, "/api/persons"),
        (Method::PATCH, "/api/persons/1"),
        (Method::POST, "/info"),
    ] {
        let (status, error) = send_json(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error, json!({ "error": "Unknown endpoint" }));
    }
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let app = memory_app(true);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["error"], "Malformed JSON");
}

#[tokio::test]
async fn unusable_bodies_are_bad_requests_with_json_errors() {
    let app = memory_app(true);

    let (status, error) =
        send_json(&app, Method::POST, "/api/persons", Some(json!({ "name": 5, "number": "1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid JSON data");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .body(Body::from("name=Ada"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(error["error"].as_str().unwrap().contains("Content-Type"));

    let (_, listed) = send_json(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn info_reports_record_count() {
    let app = memory_app(true);
    for (name, number) in [("Ada Lovelace", "39-44-5323523"), ("Arto Hellas", "040-123456")] {
        send_json(
            &app,
            Method::POST,
            "/api/persons",
            Some(json!({ "name": name, "number": number })),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/info", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with("<p>Phonebook has info for 2 people.</p><p>"));
    assert!(html.contains("GMT"));
}

#[tokio::test]
async fn health_reports_status() {
    let app = memory_app(true);
    let (status, health) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn document_store_uses_string_keys_and_schema() {
    let app = document_app(3);

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Ada Lovelace", "number": "39-44-5323523" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let key = created["id"].as_str().unwrap().to_string();
    assert_eq!(key.len(), 16);

    let (status, fetched) = send_json(&app, Method::GET, &format!("/api/persons/{}", key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, error) = send_json(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Al", "number": "040-123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().starts_with("Person validation failed"));

    let (status, _) = send_json(&app, Method::GET, "/api/persons/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seeded_document_store_lists_sample_contacts() {
    let mut config = Config::default();
    config.storage.seed_sample_data = true;
    let app = create_router(build_app_state(DocumentStore::new(), config).unwrap());

    let (status, listed) = send_json(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 4);
    assert_eq!(listed[0]["name"], "Arto Hellas");
}
