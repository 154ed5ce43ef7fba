use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{ContactId, ContactSearchView, ZipCode};
use super::repository::{ContactRepository, RepositoryError};
use super::service::{DirectoryError, DirectoryService};

/// Router builder exposing the contacts resource.
pub fn directory_router<R>(service: Arc<DirectoryService<R>>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route(
            "/contacts",
            post(create_handler::<R>).get(search_handler::<R>),
        )
        .route("/contacts/all", get(list_all_handler::<R>))
        .route(
            "/contacts/:contact_id",
            patch(update_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    zip: Option<String>,
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    draft: Result<axum::Json<super::validation::ContactDraft>, JsonRejection>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let axum::Json(draft) = match draft {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };

    match service.create(draft).await {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": "Contact created successfully",
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(DirectoryError::Validation(err)) => validation_response(err),
        Err(DirectoryError::Repository(err)) => storage_response("Failed to add contact", err),
    }
}

pub(crate) async fn list_all_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match service.list_all().await {
        Ok(contacts) if contacts.is_empty() => {
            let payload = json!({
                "message": "No contacts found",
                "data": [],
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Ok(contacts) => {
            let payload = json!({
                "message": format!("Found {} contact(s)", contacts.len()),
                "data": contacts,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(DirectoryError::Repository(err)) => storage_response("Failed to fetch contacts", err),
        Err(DirectoryError::Validation(err)) => validation_response(err),
    }
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let raw = match params.zip {
        Some(raw) => raw,
        None => {
            let payload = json!({ "error": "ZIP query parameter is required" });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let zip = match ZipCode::parse(&raw) {
        Some(zip) => zip,
        None => {
            let payload = json!({ "error": "ZIP must be a number between 0 and 99999" });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.search(zip).await {
        Ok(contacts) if contacts.is_empty() => {
            let payload = json!({
                "message": "No contacts found for this ZIP",
                "data": [],
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Ok(contacts) => {
            let views: Vec<ContactSearchView> =
                contacts.iter().map(ContactSearchView::from).collect();
            let payload = json!({
                "message": format!("Found {} contact(s) for ZIP {}", views.len(), zip),
                "data": views,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(DirectoryError::Repository(err)) => storage_response("Failed to fetch contacts", err),
        Err(DirectoryError::Validation(err)) => validation_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    Path(contact_id): Path<String>,
    patch: Result<axum::Json<super::validation::ContactPatch>, JsonRejection>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let id = match ContactId::parse(&contact_id) {
        Ok(id) => id,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let axum::Json(patch) = match patch {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };

    match service.update(&id, patch).await {
        Ok(()) => {
            let payload = json!({ "message": "Contact updated successfully" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(DirectoryError::Validation(err)) => validation_response(err),
        Err(err) if err.is_not_found() => not_found_response(),
        Err(DirectoryError::Repository(err)) => storage_response("Failed to update contact", err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    Path(contact_id): Path<String>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let id = match ContactId::parse(&contact_id) {
        Ok(id) => id,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.delete(&id).await {
        Ok(()) => {
            let payload = json!({ "message": "Contact deleted successfully" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) if err.is_not_found() => not_found_response(),
        Err(DirectoryError::Repository(err)) => storage_response("Failed to delete contact", err),
        Err(DirectoryError::Validation(err)) => validation_response(err),
    }
}

// Shape problems (wrong-typed fields, unknown keys such as the legacy
// single-`zip` schema) are client-correctable input, so they answer 400
// like every other validation failure rather than axum's default 422.
fn body_rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": format!("invalid request body: {}", rejection.body_text()),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn validation_response(err: super::validation::ValidationError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn not_found_response() -> Response {
    let payload = json!({ "error": "Contact not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn storage_response(message: &str, err: RepositoryError) -> Response {
    error!(%err, "record store operation failed");
    let payload = json!({
        "error": message,
        "details": err.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
