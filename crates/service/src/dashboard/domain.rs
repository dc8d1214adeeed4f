use serde::{Deserialize, Serialize};

/// Headline numbers: how many farms and how much land in total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(rename = "totalFarms")]
    pub total_farms: u64,
    #[serde(rename = "totalArea")]
    pub total_area: f64,
}

/// Land use split summed over all farms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaDistribution {
    #[serde(rename = "arableArea", alias = "agricultureArea")]
    pub agriculture_area: f64,
    #[serde(rename = "vegetationArea")]
    pub vegetation_area: f64,
}
