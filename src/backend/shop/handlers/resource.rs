/**
 * Generic Resource Handlers
 *
 * CRUD over a document collection. The bearer guard runs first so an
 * unauthenticated request is rejected before its body is parsed.
 *
 * Success answers use the `ApiResponse` envelope. Lookups, updates and
 * deletes of an unknown id answer 404 with an `ErrorResponse` body, as does
 * an update whose body carries no fields.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::CurrentPrincipal;
use crate::backend::shop::{DocumentStore, Resource};
use crate::shared::{ApiResponse, Document};

/// POST /{resource}
pub async fn create<R: Resource>(
    CurrentPrincipal(user): CurrentPrincipal,
    State(store): State<DocumentStore>,
    Json(mut body): Json<R>,
) -> Result<Json<ApiResponse<Document<R>>>, BackendError> {
    body.prepare_new();
    let document = store.resource::<R>().insert(body).await?;

    tracing::info!("{} {} created by {}", R::NAME, document.id, user.username);

    Ok(Json(ApiResponse::ok(
        document,
        format!("{} added successfully.", R::NAME),
    )))
}

/// GET /{resource}
pub async fn list<R: Resource>(
    CurrentPrincipal(_): CurrentPrincipal,
    State(store): State<DocumentStore>,
) -> Result<Json<ApiResponse<Vec<Document<R>>>>, BackendError> {
    let documents = store.resource::<R>().list().await?;

    let message = if documents.is_empty() {
        "Empty list returned".to_string()
    } else {
        format!("{}s data retrieved successfully", R::NAME)
    };
    Ok(Json(ApiResponse::ok(documents, message)))
}

/// GET /{resource}/{id}
pub async fn get<R: Resource>(
    CurrentPrincipal(_): CurrentPrincipal,
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document<R>>>, BackendError> {
    match store.resource::<R>().get(&id).await? {
        Some(document) => Ok(Json(ApiResponse::ok(
            document,
            format!("{} data retrieved successfully", R::NAME),
        ))),
        None => Err(BackendError::not_found(
            "An error occurred.",
            format!("{} doesn't exist.", R::NAME),
        )),
    }
}

/// PUT /{resource}/{id}
pub async fn update<R: Resource>(
    CurrentPrincipal(user): CurrentPrincipal,
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(changes): Json<R::Update>,
) -> Result<Json<ApiResponse<String>>, BackendError> {
    if !store.resource::<R>().update(&id, changes).await? {
        return Err(BackendError::not_found(
            "An error occurred",
            format!("There was an error updating the {} data.", R::NAME),
        ));
    }

    tracing::info!("{} {} updated by {}", R::NAME, id, user.username);

    Ok(Json(ApiResponse::ok(
        format!("{} with ID: {} name update is successful", R::NAME, id),
        format!("{} name updated successfully", R::NAME),
    )))
}

/// DELETE /{resource}/{id}
pub async fn delete<R: Resource>(
    CurrentPrincipal(user): CurrentPrincipal,
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, BackendError> {
    if !store.resource::<R>().delete(&id).await? {
        return Err(BackendError::not_found(
            "An error occurred",
            format!("{} with id {} doesn't exist", R::NAME, id),
        ));
    }

    tracing::info!("{} {} deleted by {}", R::NAME, id, user.username);

    Ok(Json(ApiResponse::ok(
        format!("{} with ID: {} removed", R::NAME, id),
        format!("{} deleted successfully", R::NAME),
    )))
}
