use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QuerySelect,
};

use models::{harvest, CultureCount, Harvest};

use crate::errors::ServiceError;
use crate::pagination::PaginationParams;

#[async_trait]
pub trait HarvestRepository: Send + Sync {
    async fn create(&self, harvest: Harvest) -> Result<Harvest, ServiceError>;
    async fn update(&self, harvest: Harvest) -> Result<Harvest, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Harvest, ServiceError>;
    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Harvest>, u64), ServiceError>;

    /// Harvest count per culture, in no particular order.
    async fn count_by_culture(&self) -> Result<Vec<CultureCount>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmHarvestRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmHarvestRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl HarvestRepository for SeaOrmHarvestRepository {
    async fn create(&self, harvest: Harvest) -> Result<Harvest, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let row = harvest.to_new_active_model(harvest.farm_id, now).insert(&self.db).await?;
        Ok(row.into())
    }

    async fn update(&self, harvest: Harvest) -> Result<Harvest, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let row = harvest
            .to_replace_active_model(now)
            .update(&self.db)
            .await
            .map_err(ServiceError::from_update("harvest"))?;
        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        harvest::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Harvest, ServiceError> {
        harvest::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::not_found("harvest"))
    }

    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Harvest>, u64), ServiceError> {
        let paginator = harvest::Entity::find().paginate(&self.db, params.page_size());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;
        Ok((rows.into_iter().map(Harvest::from).collect(), total))
    }

    async fn count_by_culture(&self) -> Result<Vec<CultureCount>, ServiceError> {
        let rows = harvest::Entity::find()
            .select_only()
            .column(harvest::Column::Culture)
            .column_as(harvest::Column::Id.count(), "count")
            .group_by(harvest::Column::Culture)
            .into_model::<CultureCount>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockHarvestRepository {
        harvests: Mutex<BTreeMap<i32, Harvest>>,
        next_id: Mutex<i32>,
        failure: Mutex<Option<String>>,
    }

    impl MockHarvestRepository {
        /// Make every subsequent call fail with a storage error.
        pub fn fail_with(&self, msg: &str) {
            *self.failure.lock().unwrap() = Some(msg.to_string());
        }

        fn check(&self) -> Result<(), ServiceError> {
            match self.failure.lock().unwrap().as_ref() {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl HarvestRepository for MockHarvestRepository {
        async fn create(&self, mut harvest: Harvest) -> Result<Harvest, ServiceError> {
            self.check()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            harvest.id = *next;
            self.harvests.lock().unwrap().insert(harvest.id, harvest.clone());
            Ok(harvest)
        }

        async fn update(&self, harvest: Harvest) -> Result<Harvest, ServiceError> {
            self.check()?;
            let mut harvests = self.harvests.lock().unwrap();
            let slot = harvests.get_mut(&harvest.id).ok_or_else(|| ServiceError::not_found("harvest"))?;
            *slot = harvest;
            Ok(slot.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.check()?;
            self.harvests.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_by_id(&self, id: i32) -> Result<Harvest, ServiceError> {
            self.check()?;
            self.harvests.lock().unwrap().get(&id).cloned().ok_or_else(|| ServiceError::not_found("harvest"))
        }

        async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Harvest>, u64), ServiceError> {
            self.check()?;
            let harvests = self.harvests.lock().unwrap();
            let page = harvests
                .values()
                .skip(params.offset() as usize)
                .take(params.page_size() as usize)
                .cloned()
                .collect();
            Ok((page, harvests.len() as u64))
        }

        async fn count_by_culture(&self) -> Result<Vec<CultureCount>, ServiceError> {
            self.check()?;
            let mut by_culture: BTreeMap<String, i64> = BTreeMap::new();
            for h in self.harvests.lock().unwrap().values() {
                *by_culture.entry(h.culture.clone()).or_default() += 1;
            }
            Ok(by_culture.into_iter().map(|(culture, count)| CultureCount { culture, count }).collect())
        }
    }
}
