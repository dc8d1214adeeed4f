use std::sync::Arc;

use tracing::{info, instrument};

use models::Harvest;

use crate::errors::ServiceError;
use crate::harvest::repository::HarvestRepository;
use crate::pagination::{PaginatedResult, PaginationParams};

/// Application service for harvest records.
pub struct HarvestService<R: HarvestRepository> {
    repo: Arc<R>,
}

impl<R: HarvestRepository> HarvestService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, harvest), fields(culture = %harvest.culture, year = harvest.year))]
    pub async fn create(&self, harvest: Harvest) -> Result<Harvest, ServiceError> {
        harvest.validate()?;
        let created = self.repo.create(harvest).await?;
        info!(harvest_id = created.id, farm_id = ?created.farm_id, "harvest_created");
        Ok(created)
    }

    #[instrument(skip(self, harvest), fields(harvest_id = harvest.id))]
    pub async fn update(&self, harvest: Harvest) -> Result<Harvest, ServiceError> {
        harvest.validate()?;
        self.repo.update(harvest).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> { self.repo.delete(id).await }

    pub async fn get_by_id(&self, id: i32) -> Result<Harvest, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn get_all(&self, params: PaginationParams) -> Result<PaginatedResult<Harvest>, ServiceError> {
        let params = params.normalize();
        let (items, total) = self.repo.get_all(params).await?;
        Ok(PaginatedResult::new(items, total, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::repository::mock::MockHarvestRepository;

    #[tokio::test]
    async fn rejects_invalid_harvests() {
        let svc = HarvestService::new(Arc::new(MockHarvestRepository::default()));
        assert!(svc.create(Harvest::new(0, "Soja")).await.unwrap_err().is_validation());
        assert!(svc.create(Harvest::new(2024, "")).await.unwrap_err().is_validation());
        let ok = svc.create(Harvest::new(2024, "Soja")).await.unwrap();
        assert_eq!(svc.get_by_id(ok.id).await.unwrap().culture, "Soja");
    }
}
