use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use models::Farm;
use service::pagination::PaginatedResult;

use crate::errors::JsonApiError;
use crate::routes::{AppState, PageQuery};

#[utoipa::path(
    post, path = "/api/farms", tag = "farms",
    request_body = crate::openapi::FarmDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::FarmDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Farm>, JsonRejection>,
) -> Result<(StatusCode, Json<Farm>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.farms.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/farms", tag = "farms",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of farms, without harvests", body = crate::openapi::FarmPageDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<PaginatedResult<Farm>>, JsonApiError> {
    let page = state.farms.get_all(q.params()).await?;
    info!(count = page.items.len(), total = page.total, "list farms");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/api/farms/{id}", tag = "farms",
    params(("id" = i32, Path, description = "Farm ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::FarmDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Farm>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.farms.get_by_id(id).await?))
}

/// Replaces the farm row, owner included. Harvests are left as they are.
#[utoipa::path(
    put, path = "/api/farms/{id}", tag = "farms",
    params(("id" = i32, Path, description = "Farm ID")),
    request_body = crate::openapi::FarmDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::FarmDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Farm>, JsonRejection>,
) -> Result<Json<Farm>, JsonApiError> {
    let Path(id) = id?;
    let Json(mut input) = payload?;
    input.id = id;
    Ok(Json(state.farms.update(input).await?))
}

#[utoipa::path(
    delete, path = "/api/farms/{id}", tag = "farms",
    params(("id" = i32, Path, description = "Farm ID")),
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
    state.farms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
