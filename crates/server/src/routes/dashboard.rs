use axum::{extract::State, Json};

use models::{CultureCount, StateCount};
use service::dashboard::{AreaDistribution, DashboardData};

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/api/dashboard", tag = "dashboard",
    responses(
        (status = 200, description = "Farm count and total area", body = crate::openapi::DashboardDataDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardData>, JsonApiError> {
    Ok(Json(state.dashboard.dashboard_data().await?))
}

#[utoipa::path(
    get, path = "/api/dashboard/farm-states", tag = "dashboard",
    responses(
        (status = 200, description = "Farm count per state", body = [crate::openapi::StateCountDoc]),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn farm_states(State(state): State<AppState>) -> Result<Json<Vec<StateCount>>, JsonApiError> {
    Ok(Json(state.dashboard.farms_by_state().await?))
}

#[utoipa::path(
    get, path = "/api/dashboard/harvest-cultures", tag = "dashboard",
    responses(
        (status = 200, description = "Harvest count per culture", body = [crate::openapi::CultureCountDoc]),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn harvest_cultures(State(state): State<AppState>) -> Result<Json<Vec<CultureCount>>, JsonApiError> {
    Ok(Json(state.dashboard.harvest_cultures().await?))
}

#[utoipa::path(
    get, path = "/api/dashboard/areas", tag = "dashboard",
    responses(
        (status = 200, description = "Arable and vegetation area sums", body = crate::openapi::AreaDistributionDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn areas(State(state): State<AppState>) -> Result<Json<AreaDistribution>, JsonApiError> {
    Ok(Json(state.dashboard.area_distribution().await?))
}
