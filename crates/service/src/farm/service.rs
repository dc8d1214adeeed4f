use std::sync::Arc;

use tracing::{info, instrument};

use models::Farm;

use crate::errors::ServiceError;
use crate::farm::repository::FarmRepository;
use crate::pagination::{PaginatedResult, PaginationParams};

/// Application service for farms.
pub struct FarmService<R: FarmRepository> {
    repo: Arc<R>,
}

impl<R: FarmRepository> FarmService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, farm), fields(state = %farm.state, farmer_id = ?farm.farmer_id))]
    pub async fn create(&self, farm: Farm) -> Result<Farm, ServiceError> {
        farm.validate()?;
        let created = self.repo.create(farm).await?;
        info!(farm_id = created.id, harvests = created.harvests.len(), "farm_created");
        Ok(created)
    }

    /// Replace the farm's columns. Nested harvests are not written here, so
    /// only the farm's own fields are checked.
    #[instrument(skip(self, farm), fields(farm_id = farm.id))]
    pub async fn update(&self, farm: Farm) -> Result<Farm, ServiceError> {
        farm.validate_fields()?;
        let updated = self.repo.update(farm).await?;
        info!(farm_id = updated.id, "farm_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(farm_id = id, "farm_deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Farm, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn get_all(&self, params: PaginationParams) -> Result<PaginatedResult<Farm>, ServiceError> {
        let params = params.normalize();
        let (items, total) = self.repo.get_all(params).await?;
        Ok(PaginatedResult::new(items, total, params))
    }
}
