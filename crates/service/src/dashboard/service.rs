use std::sync::Arc;

use tracing::{debug, instrument};

use models::{CultureCount, StateCount};

use super::domain::{AreaDistribution, DashboardData};
use crate::errors::ServiceError;
use crate::farm::repository::FarmRepository;
use crate::harvest::repository::HarvestRepository;

/// Dashboard aggregates. Every call is all-or-nothing: one failed read fails
/// the whole result.
pub struct DashboardService<F: FarmRepository, H: HarvestRepository> {
    farms: Arc<F>,
    harvests: Arc<H>,
}

impl<F: FarmRepository, H: HarvestRepository> DashboardService<F, H> {
    pub fn new(farms: Arc<F>, harvests: Arc<H>) -> Self { Self { farms, harvests } }

    #[instrument(skip(self))]
    pub async fn dashboard_data(&self) -> Result<DashboardData, ServiceError> {
        let total_farms = self.farms.count().await?;
        let total_area = self.farms.sum_total_area().await?;
        debug!(total_farms, total_area, "dashboard totals");
        Ok(DashboardData { total_farms, total_area })
    }

    pub async fn farms_by_state(&self) -> Result<Vec<StateCount>, ServiceError> {
        self.farms.count_by_state().await
    }

    pub async fn harvest_cultures(&self) -> Result<Vec<CultureCount>, ServiceError> {
        self.harvests.count_by_culture().await
    }

    #[instrument(skip(self))]
    pub async fn area_distribution(&self) -> Result<AreaDistribution, ServiceError> {
        let agriculture_area = self.farms.sum_agriculture_area().await?;
        let vegetation_area = self.farms.sum_vegetation_area().await?;
        Ok(AreaDistribution { agriculture_area, vegetation_area })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::farm::repository::{mock::MockFarmRepository, SeaOrmFarmRepository};
    use crate::harvest::repository::{mock::MockHarvestRepository, SeaOrmHarvestRepository};
    use crate::test_support::get_db;
    use models::{Farm, Harvest};

    async fn seed<R: FarmRepository>(farms: &R) -> Result<(), ServiceError> {
        farms.create(Farm::new("A", "Campinas", "SP", 100.0, 60.0, 40.0)).await?;
        farms.create(Farm::new("B", "Ribeirão Preto", "SP", 50.0, 20.0, 30.0)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn two_sp_farms_scenario() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let farms = Arc::new(SeaOrmFarmRepository::new(db.clone()));
        let harvests = Arc::new(SeaOrmHarvestRepository::new(db));
        seed(farms.as_ref()).await?;
        for c in ["Soja", "Soja", "Milho"] {
            harvests.create(Harvest::new(2024, c)).await?;
        }
        let svc = DashboardService::new(farms, harvests);

        assert_eq!(svc.dashboard_data().await?, DashboardData { total_farms: 2, total_area: 150.0 });
        assert_eq!(svc.farms_by_state().await?, vec![StateCount { state: "SP".into(), count: 2 }]);
        assert_eq!(
            svc.area_distribution().await?,
            AreaDistribution { agriculture_area: 80.0, vegetation_area: 70.0 }
        );
        let cultures: HashMap<String, i64> =
            svc.harvest_cultures().await?.into_iter().map(|c| (c.culture, c.count)).collect();
        assert_eq!(cultures, HashMap::from([("Soja".to_string(), 2), ("Milho".to_string(), 1)]));
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_yields_zeroes() {
        let svc = DashboardService::new(
            Arc::new(MockFarmRepository::default()),
            Arc::new(MockHarvestRepository::default()),
        );
        assert_eq!(svc.dashboard_data().await.unwrap(), DashboardData::default());
        assert_eq!(svc.area_distribution().await.unwrap(), AreaDistribution::default());
        assert!(svc.farms_by_state().await.unwrap().is_empty());
        assert!(svc.harvest_cultures().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failed_read_fails_the_whole_call() {
        let farms = Arc::new(MockFarmRepository::default());
        seed(farms.as_ref()).await.unwrap();
        let harvests = Arc::new(MockHarvestRepository::default());
        harvests.fail_with("connection reset");
        let svc = DashboardService::new(farms.clone(), harvests);

        assert_eq!(svc.dashboard_data().await.unwrap().total_farms, 2);
        assert!(matches!(svc.harvest_cultures().await, Err(ServiceError::Db(_))));

        farms.fail_with("connection reset");
        assert!(matches!(svc.dashboard_data().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.area_distribution().await, Err(ServiceError::Db(_))));
    }

    #[test]
    fn area_distribution_json_names() {
        let v = serde_json::to_value(AreaDistribution { agriculture_area: 80.0, vegetation_area: 70.0 }).unwrap();
        assert_eq!(v, serde_json::json!({"arableArea": 80.0, "vegetationArea": 70.0}));
        let back: AreaDistribution =
            serde_json::from_value(serde_json::json!({"agricultureArea": 1.0, "vegetationArea": 2.0})).unwrap();
        assert_eq!(back.agriculture_area, 1.0);
        let d = serde_json::to_value(DashboardData { total_farms: 2, total_area: 150.0 }).unwrap();
        assert_eq!(d, serde_json::json!({"totalFarms": 2, "totalArea": 150.0}));
    }
}
