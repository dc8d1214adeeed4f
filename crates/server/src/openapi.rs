//! OpenAPI document. The `*Doc` types mirror the JSON shapes of the domain
//! types, which live in crates without a utoipa dependency.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(Serialize, ToSchema)]
pub struct HarvestDoc {
    pub id: i32,
    pub year: i32,
    pub culture: String,
    pub farm_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct FarmDoc {
    pub id: i32,
    #[serde(rename = "farmName")]
    pub farm_name: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "totalArea")]
    pub total_area: f64,
    #[serde(rename = "arableArea")]
    pub arable_area: f64,
    #[serde(rename = "vegetationArea")]
    pub vegetation_area: f64,
    pub farmer_id: Option<i32>,
    pub harvests: Vec<HarvestDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct FarmerDoc {
    pub id: i32,
    #[serde(rename = "farmerName")]
    pub farmer_name: String,
    /// CPF (11 characters) or CNPJ (14 characters)
    #[serde(rename = "federalIdentification")]
    pub federal_identification: String,
    pub farms: Vec<FarmDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct FarmerPageDoc {
    pub items: Vec<FarmerDoc>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct FarmPageDoc {
    pub items: Vec<FarmDoc>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct HarvestPageDoc {
    pub items: Vec<HarvestDoc>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardDataDoc {
    #[serde(rename = "totalFarms")]
    pub total_farms: u64,
    #[serde(rename = "totalArea")]
    pub total_area: f64,
}

#[derive(Serialize, ToSchema)]
pub struct AreaDistributionDoc {
    #[serde(rename = "arableArea")]
    pub arable_area: f64,
    #[serde(rename = "vegetationArea")]
    pub vegetation_area: f64,
}

#[derive(Serialize, ToSchema)]
pub struct StateCountDoc { pub state: String, pub count: i64 }

#[derive(Serialize, ToSchema)]
pub struct CultureCountDoc { pub culture: String, pub count: i64 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::farmers::create,
        crate::routes::farmers::list,
        crate::routes::farmers::get,
        crate::routes::farmers::update,
        crate::routes::farmers::delete,
        crate::routes::farms::create,
        crate::routes::farms::list,
        crate::routes::farms::get,
        crate::routes::farms::update,
        crate::routes::farms::delete,
        crate::routes::harvests::create,
        crate::routes::harvests::list,
        crate::routes::harvests::get,
        crate::routes::harvests::update,
        crate::routes::harvests::delete,
        crate::routes::dashboard::summary,
        crate::routes::dashboard::farm_states,
        crate::routes::dashboard::harvest_cultures,
        crate::routes::dashboard::areas,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            HarvestDoc,
            FarmDoc,
            FarmerDoc,
            FarmerPageDoc,
            FarmPageDoc,
            HarvestPageDoc,
            DashboardDataDoc,
            AreaDistributionDoc,
            StateCountDoc,
            CultureCountDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "farmers"),
        (name = "farms"),
        (name = "harvests"),
        (name = "dashboard")
    )
)]
pub struct ApiDoc;
