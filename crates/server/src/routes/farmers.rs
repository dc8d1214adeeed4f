use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use models::Farmer;
use service::pagination::PaginatedResult;

use crate::errors::JsonApiError;
use crate::routes::{AppState, PageQuery};

#[utoipa::path(
    post, path = "/api/farmers", tag = "farmers",
    request_body = crate::openapi::FarmerDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::FarmerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Farmer>, JsonRejection>,
) -> Result<(StatusCode, Json<Farmer>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.farmers.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/farmers", tag = "farmers",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of farmers with farms and harvests", body = crate::openapi::FarmerPageDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<PaginatedResult<Farmer>>, JsonApiError> {
    let page = state.farmers.get_all(q.params()).await?;
    info!(count = page.items.len(), total = page.total, "list farmers");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/api/farmers/{id}", tag = "farmers",
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::FarmerDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Farmer>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.farmers.get_by_id(id).await?))
}

/// Replaces the farmer; farms in the body replace the stored ones.
#[utoipa::path(
    put, path = "/api/farmers/{id}", tag = "farmers",
    params(("id" = i32, Path, description = "Farmer ID")),
    request_body = crate::openapi::FarmerDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::FarmerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Farmer>, JsonRejection>,
) -> Result<Json<Farmer>, JsonApiError> {
    let Path(id) = id?;
    let Json(mut input) = payload?;
    input.id = id;
    Ok(Json(state.farmers.update(input).await?))
}

#[utoipa::path(
    delete, path = "/api/farmers/{id}", tag = "farmers",
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.farmers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
