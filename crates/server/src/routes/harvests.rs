use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use models::Harvest;
use service::pagination::PaginatedResult;

use crate::errors::JsonApiError;
use crate::routes::{AppState, PageQuery};

#[utoipa::path(
    post, path = "/api/harvests", tag = "harvests",
    request_body = crate::openapi::HarvestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::HarvestDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Harvest>, JsonRejection>,
) -> Result<(StatusCode, Json<Harvest>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.harvests.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/harvests", tag = "harvests",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of harvests", body = crate::openapi::HarvestPageDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<PaginatedResult<Harvest>>, JsonApiError> {
    let page = state.harvests.get_all(q.params()).await?;
    info!(count = page.items.len(), total = page.total, "list harvests");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/api/harvests/{id}", tag = "harvests",
    params(("id" = i32, Path, description = "Harvest ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::HarvestDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Harvest>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.harvests.get_by_id(id).await?))
}

#[utoipa::path(
    put, path = "/api/harvests/{id}", tag = "harvests",
    params(("id" = i32, Path, description = "Harvest ID")),
    request_body = crate::openapi::HarvestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::HarvestDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Harvest>, JsonRejection>,
) -> Result<Json<Harvest>, JsonApiError> {
    let Path(id) = id?;
    let Json(mut input) = payload?;
    input.id = id;
    Ok(Json(state.harvests.update(input).await?))
}

#[utoipa::path(
    delete, path = "/api/harvests/{id}", tag = "harvests",
    params(("id" = i32, Path, description = "Harvest ID")),
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
    state.harvests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
