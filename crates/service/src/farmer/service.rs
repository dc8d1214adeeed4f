use std::sync::Arc;

use tracing::{info, instrument};

use models::Farmer;

use crate::errors::ServiceError;
use crate::farmer::repository::FarmerRepository;
use crate::pagination::{PaginatedResult, PaginationParams};

/// Farmer business service independent of web framework
pub struct FarmerService<R: FarmerRepository> {
    repo: Arc<R>,
}

impl<R: FarmerRepository> FarmerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and persist a farmer with its farms and harvests.
    ///
    /// # Examples
    /// ```
    /// use service::farmer::{service::FarmerService, repository::mock::MockFarmerRepository};
    /// use models::Farmer;
    /// use std::sync::Arc;
    /// let svc = FarmerService::new(Arc::new(MockFarmerRepository::default()));
    /// let farmer = tokio_test::block_on(svc.create(Farmer::new("Jane", "12345678901"))).unwrap();
    /// assert!(farmer.id > 0);
    /// let short = tokio_test::block_on(svc.create(Farmer::new("John", "123")));
    /// assert!(short.unwrap_err().is_validation());
    /// ```
    #[instrument(skip(self, farmer), fields(farms = farmer.farms.len()))]
    pub async fn create(&self, farmer: Farmer) -> Result<Farmer, ServiceError> {
        farmer.validate()?;
        let created = self.repo.create(farmer).await?;
        info!(farmer_id = created.id, count = created.farms.len(), "farmer_created");
        Ok(created)
    }

    /// Replace a farmer. Existing farms are dropped and `farmer.farms` is
    /// inserted in their place with fresh ids.
    #[instrument(skip(self, farmer), fields(farmer_id = farmer.id, farms = farmer.farms.len()))]
    pub async fn update(&self, farmer: Farmer) -> Result<Farmer, ServiceError> {
        farmer.validate()?;
        let updated = self.repo.update(farmer).await?;
        info!(farmer_id = updated.id, count = updated.farms.len(), "farmer_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(farmer_id = id, "farmer_deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Farmer, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn get_all(&self, params: PaginationParams) -> Result<PaginatedResult<Farmer>, ServiceError> {
        let params = params.normalize();
        let (items, total) = self.repo.get_all(params).await?;
        Ok(PaginatedResult::new(items, total, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farmer::repository::{mock::MockFarmerRepository, SeaOrmFarmerRepository};
    use crate::test_support::get_db;
    use models::{Farm, Harvest};

    fn mock_svc() -> FarmerService<MockFarmerRepository> {
        FarmerService::new(Arc::new(MockFarmerRepository::default()))
    }

    #[tokio::test]
    async fn create_jane_yields_an_id() -> Result<(), anyhow::Error> {
        let svc = FarmerService::new(Arc::new(SeaOrmFarmerRepository::new(get_db().await?)));
        let jane = svc.create(Farmer::new("Jane", "12345678901")).await?;
        assert_ne!(jane.id, 0);
        assert_eq!(svc.get_by_id(jane.id).await?.name, "Jane");
        Ok(())
    }

    #[tokio::test]
    async fn validation_failures_do_not_persist() {
        let svc = mock_svc();
        assert!(svc.create(Farmer::new("", "12345678901")).await.unwrap_err().is_validation());
        assert!(svc.create(Farmer::new("Jane", "1234567890")).await.unwrap_err().is_validation());
        let bad_farm = Farm::new("A", "Campinas", "SP", 100.0, 60.0, 30.0);
        let err = svc.create(Farmer::new("Jane", "12345678901").with_farms(vec![bad_farm])).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(svc.get_all(PaginationParams::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn update_validates_before_touching_the_store() {
        let svc = mock_svc();
        let created = svc.create(Farmer::new("Jane", "12345678901")).await.unwrap();
        let err = svc.update(Farmer { federal_identification: "1".into(), ..created.clone() }).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(svc.get_by_id(created.id).await.unwrap().federal_identification, "12345678901");
    }

    #[tokio::test]
    async fn update_of_unknown_farmer_is_not_found() {
        let mut ghost = Farmer::new("Ghost", "12345678901234");
        ghost.id = 5;
        assert!(matches!(mock_svc().update(ghost).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn round_trip_through_the_database() -> Result<(), anyhow::Error> {
        let svc = FarmerService::new(Arc::new(SeaOrmFarmerRepository::new(get_db().await?)));
        let input = Farmer::new("Acme Agro", "12345678000199").with_farms(vec![
            Farm::new("Boa Vista", "Campinas", "SP", 0.1 + 0.2, 0.1, 0.2)
                .with_harvests(vec![Harvest::new(2024, "Café")]),
        ]);
        let created = svc.create(input).await?;
        let found = svc.get_by_id(created.id).await?;
        assert_eq!(found.name, "Acme Agro");
        assert_eq!(found.farms.len(), 1);
        assert_eq!(found.farms[0].total_area, 0.1 + 0.2);
        assert_eq!(found.farms[0].harvests[0].culture, "Café");

        svc.delete(created.id).await?;
        svc.delete(created.id).await?;
        assert!(matches!(svc.get_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn pages_through_twelve_farmers() {
        let svc = mock_svc();
        for i in 0..12 {
            svc.create(Farmer::new(format!("f{i}"), format!("{:011}", i))).await.unwrap();
        }
        let page = svc.get_all(PaginationParams::new(2, 5)).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].name, "f5");
    }
}
