use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use super::common::{body_json, build_service, draft, UnavailableRepository};
use crate::directory::router::{delete_handler, list_all_handler, search_handler, update_handler};
use crate::directory::validation::ContactPatch;
use crate::directory::{directory_router, DirectoryService};

fn search_query(zip: Option<&str>) -> Query<crate::directory::router::SearchParams> {
    let uri = match zip {
        Some(zip) => format!("http://directory/contacts?zip={zip}"),
        None => "http://directory/contacts".to_string(),
    };
    Query::try_from_uri(&uri.parse().expect("valid uri")).expect("query parses")
}

#[tokio::test]
async fn create_route_returns_created_with_success_body() {
    let (service, repository) = build_service();
    let router = directory_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/contacts")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "name": "A",
                        "email": "a@x.com",
                        "phone": "555",
                        "zipRanges": [{"start": 10000, "end": 10010}],
                    }))
                    .expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Contact created successfully"));
    assert_eq!(repository.snapshot().len(), 1);
}

#[tokio::test]
async fn create_route_rejects_invalid_payload_with_bad_request() {
    let (service, repository) = build_service();
    let router = directory_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/contacts")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "name": "A",
                        "email": "a@x.com",
                        "phone": "555",
                        "zipRanges": [{"start": 10010, "end": 10000}],
                    }))
                    .expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid ZIP range format"));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn create_route_maps_wrong_typed_fields_to_bad_request() {
    let (service, repository) = build_service();
    let router = directory_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/contacts")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "name": 5,
                        "email": "a@x.com",
                        "phone": "555",
                        "zipRanges": [{"start": 10000, "end": 10010}],
                    }))
                    .expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("invalid request body"));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn create_route_rejects_the_legacy_single_zip_key_with_bad_request() {
    let (service, repository) = build_service();
    let router = directory_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/contacts")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "name": "A",
                        "email": "a@x.com",
                        "phone": "555",
                        "zipRanges": [{"start": 10000, "end": 10010}],
                        "zip": 10005,
                    }))
                    .expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("invalid request body"));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn update_route_maps_wrong_typed_fields_to_bad_request() {
    let (service, _) = build_service();
    let router = directory_router(service);

    let response = router
        .oneshot(
            axum::http::Request::patch(format!("/contacts/{}", Uuid::new_v4()))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({"phone": 5550199})).expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("invalid request body"));
}

#[tokio::test]
async fn search_without_zip_parameter_is_bad_request() {
    let (service, _) = build_service();

    let response = search_handler(State(service), search_query(None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("ZIP query parameter is required"));
}

#[tokio::test]
async fn search_with_non_numeric_zip_is_bad_request() {
    let (service, _) = build_service();

    let response = search_handler(State(service), search_query(Some("downtown"))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("ZIP must be a number between 0 and 99999"));
}

#[tokio::test]
async fn search_accepts_zip_zero() {
    let (service, _) = build_service();

    let response = search_handler(State(service), search_query(Some("0"))).await;

    // An empty directory means no match, never "missing parameter".
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("No contacts found for this ZIP"));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn search_projects_reachability_fields_only() {
    let (service, _) = build_service();
    service.create(draft()).await.expect("contact stores");

    let response = search_handler(State(service), search_query(Some("10005"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Found 1 contact(s) for ZIP 10005"));
    let entry = &body["data"][0];
    assert_eq!(entry["name"], json!("A"));
    assert_eq!(entry["email"], json!("a@x.com"));
    assert_eq!(entry["phone"], json!("555"));
    assert!(entry.get("id").is_none());
    assert!(entry.get("zipRanges").is_none());
}

#[tokio::test]
async fn list_all_reports_not_found_when_directory_is_empty() {
    let (service, _) = build_service();

    let response = list_all_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("No contacts found"));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn list_all_returns_full_records() {
    let (service, _) = build_service();
    let created = service.create(draft()).await.expect("contact stores");

    let response = list_all_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Found 1 contact(s)"));
    let entry = &body["data"][0];
    assert_eq!(entry["id"], json!(created.id.to_string()));
    assert_eq!(entry["zipRanges"][0]["start"], json!(10_000));
    assert!(entry.get("createdAt").is_some());
}

#[tokio::test]
async fn update_with_malformed_id_is_bad_request() {
    let (service, _) = build_service();

    let response = update_handler(
        State(service),
        Path("not-an-id".to_string()),
        Ok(axum::Json(ContactPatch {
            phone: Some("555-0199".to_string()),
            ..ContactPatch::default()
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Invalid contact ID"));
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let (service, _) = build_service();

    let response = update_handler(
        State(service),
        Path(Uuid::new_v4().to_string()),
        Ok(axum::Json(ContactPatch {
            phone: Some("555-0199".to_string()),
            ..ContactPatch::default()
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Contact not found"));
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let (service, _) = build_service();

    let response = delete_handler(State(service), Path(Uuid::new_v4().to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Contact not found"));
}

#[tokio::test]
async fn storage_failures_surface_as_internal_errors_with_detail() {
    let service = Arc::new(DirectoryService::new(Arc::new(UnavailableRepository)));

    let response = list_all_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Failed to fetch contacts"));
    assert_eq!(
        body["details"],
        json!("record store unavailable: record store offline")
    );
}
