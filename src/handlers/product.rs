//! Product CRUD handlers: create, read, list, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::{ProductCreate, ProductRead, ProductUpdate};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Insert and echo the input back. The generated id is not looked up, so the
/// response carries no `id`; list or read the product to learn it.
#[utoipa::path(
    post,
    path = "/products/",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product stored; body echoes the input", body = ProductCreate),
        (status = 422, description = "Body does not match the create shape", body = ErrorBody),
    ),
    tag = "products"
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let product = RequestValidator::create(RequestValidator::json_body(body)?)?;
    state.products.insert(&product).await?;
    tracing::info!(product_name = %product.product_name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}/",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, body = ProductRead),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "products"
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<ProductRead>, AppError> {
    let id = RequestValidator::product_id(&id_str)?;
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/products/",
    responses((status = 200, description = "Every product, ordered by id", body = Vec<ProductRead>)),
    tag = "products"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductRead>>, AppError> {
    let rows = state.products.list_all().await?;
    Ok(Json(rows))
}

/// Look up, apply only the fields present in the body, then read the row again.
#[utoipa::path(
    put,
    path = "/products/{product_id}/",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Row after the update", body = ProductRead),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 422, description = "Body does not match the update shape", body = ErrorBody),
    ),
    tag = "products"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProductRead>, AppError> {
    let id = RequestValidator::product_id(&id_str)?;
    let changes = RequestValidator::update(RequestValidator::json_body(body)?)?;
    if state.products.find_by_id(id).await?.is_none() {
        return Err(AppError::product_not_found());
    }
    state.products.update_by_id(id, &changes).await?;
    tracing::info!(product_id = id, fields = changes.fields().len(), "product updated");
    // Another writer may delete the row between the write and this read.
    let refreshed = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    Ok(Json(refreshed))
}

/// Responds with the row as it was before deletion.
#[utoipa::path(
    delete,
    path = "/products/{product_id}/",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted row", body = ProductRead),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "products"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<ProductRead>, AppError> {
    let id = RequestValidator::product_id(&id_str)?;
    let snapshot = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    state.products.delete_by_id(id).await?;
    tracing::info!(product_id = id, "product deleted");
    Ok(Json(snapshot))
}
