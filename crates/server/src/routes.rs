use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::dashboard::DashboardService;
use service::farm::{FarmService, SeaOrmFarmRepository};
use service::farmer::{FarmerService, SeaOrmFarmerRepository};
use service::harvest::{HarvestService, SeaOrmHarvestRepository};
use service::pagination::PaginationParams;

use crate::openapi::ApiDoc;

pub mod dashboard;
pub mod farmers;
pub mod farms;
pub mod harvests;

/// Services shared by every handler; all of them sit on one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub farmers: Arc<FarmerService<SeaOrmFarmerRepository>>,
    pub farms: Arc<FarmService<SeaOrmFarmRepository>>,
    pub harvests: Arc<HarvestService<SeaOrmHarvestRepository>>,
    pub dashboard: Arc<DashboardService<SeaOrmFarmRepository, SeaOrmHarvestRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let farm_repo = Arc::new(SeaOrmFarmRepository::new(db.clone()));
        let harvest_repo = Arc::new(SeaOrmHarvestRepository::new(db.clone()));
        Self {
            farmers: Arc::new(FarmerService::new(Arc::new(SeaOrmFarmerRepository::new(db)))),
            farms: Arc::new(FarmService::new(farm_repo.clone())),
            harvests: Arc::new(HarvestService::new(harvest_repo.clone())),
            dashboard: Arc::new(DashboardService::new(farm_repo, harvest_repo)),
        }
    }
}

/// `?page=&limit=` as sent by clients. Values that are missing, not numbers
/// or not positive fall back to the defaults.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// page size (default 10)
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn params(&self) -> PaginationParams {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0);
        PaginationParams::new(parse(&self.page), parse(&self.limit)).normalize()
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, CRUD resources, dashboard and API docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/farmers", get(farmers::list).post(farmers::create))
        .route("/api/farmers/:id", get(farmers::get).put(farmers::update).delete(farmers::delete))
        .route("/api/farms", get(farms::list).post(farms::create))
        .route("/api/farms/:id", get(farms::get).put(farms::update).delete(farms::delete))
        .route("/api/harvests", get(harvests::list).post(harvests::create))
        .route("/api/harvests/:id", get(harvests::get).put(harvests::update).delete(harvests::delete))
        .route("/api/dashboard", get(dashboard::summary))
        .route("/api/dashboard/farm-states", get(dashboard::farm_states))
        .route("/api/dashboard/harvest-cultures", get(dashboard::harvest_cultures))
        .route("/api/dashboard/areas", get(dashboard::areas));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
