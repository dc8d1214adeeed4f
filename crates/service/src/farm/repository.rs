use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait, QuerySelect,
    TransactionTrait,
};

use models::{farm, harvest, Farm, StateCount};

use crate::errors::ServiceError;
use crate::pagination::PaginationParams;

/// Persistence capability for farms, including the dashboard aggregates.
#[async_trait]
pub trait FarmRepository: Send + Sync {
    async fn create(&self, farm: Farm) -> Result<Farm, ServiceError>;
    async fn update(&self, farm: Farm) -> Result<Farm, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Farm, ServiceError>;
    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farm>, u64), ServiceError>;

    async fn count(&self) -> Result<u64, ServiceError>;
    async fn sum_total_area(&self) -> Result<f64, ServiceError>;
    async fn sum_agriculture_area(&self) -> Result<f64, ServiceError>;
    async fn sum_vegetation_area(&self) -> Result<f64, ServiceError>;
    async fn count_by_state(&self) -> Result<Vec<StateCount>, ServiceError>;
}

/// Insert `farm` owned by `farmer_id` together with its harvests.
pub(crate) async fn insert_farm_tree<C: ConnectionTrait>(
    db: &C,
    farm: &Farm,
    farmer_id: Option<i32>,
    now: DateTimeWithTimeZone,
) -> Result<Farm, ServiceError> {
    let row = farm.to_new_active_model(farmer_id, now).insert(db).await?;
    let mut stored = Farm::from(row);
    for h in &farm.harvests {
        let hrow = h.to_new_active_model(Some(stored.id), now).insert(db).await?;
        stored.harvests.push(hrow.into());
    }
    Ok(stored)
}

/// Re-insert `farm` owned by `farmer_id`, keeping the ids it already carries.
///
/// Harvests are upserted on their id, so an existing row is moved back under
/// the farm instead of being duplicated. Zero ids become new rows.
pub(crate) async fn restore_farm_tree<C: ConnectionTrait>(
    db: &C,
    farm: &Farm,
    farmer_id: Option<i32>,
    now: DateTimeWithTimeZone,
) -> Result<Farm, ServiceError> {
    let row = farm.to_restore_active_model(farmer_id, now).insert(db).await?;
    let mut stored = Farm::from(row);
    for h in &farm.harvests {
        let hrow = harvest::Entity::insert(h.to_restore_active_model(Some(stored.id), now))
            .on_conflict(
                OnConflict::column(harvest::Column::Id)
                    .update_columns([
                        harvest::Column::Year,
                        harvest::Column::Culture,
                        harvest::Column::FarmId,
                        harvest::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(db)
            .await?;
        stored.harvests.push(hrow.into());
    }
    Ok(stored)
}

/// Attach each farm's harvests, preserving the order of `rows`.
pub(crate) async fn load_farm_trees<C: ConnectionTrait>(
    db: &C,
    rows: Vec<farm::Model>,
) -> Result<Vec<Farm>, ServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let harvests = rows.load_many(harvest::Entity, db).await?;
    Ok(rows
        .into_iter()
        .zip(harvests)
        .map(|(row, hs)| {
            let mut f = Farm::from(row);
            f.harvests = hs.into_iter().map(Into::into).collect();
            f
        })
        .collect())
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmFarmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmFarmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn sum_column(&self, col: farm::Column) -> Result<f64, ServiceError> {
        let sum: Option<Option<f64>> = farm::Entity::find()
            .select_only()
            .column_as(col.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(sum.flatten().unwrap_or(0.0))
    }
}

#[async_trait]
impl FarmRepository for SeaOrmFarmRepository {
    async fn create(&self, farm: Farm) -> Result<Farm, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let txn = self.db.begin().await?;
        let stored = insert_farm_tree(&txn, &farm, farm.farmer_id, now).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn update(&self, farm: Farm) -> Result<Farm, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let row = farm
            .to_replace_active_model(now)
            .update(&self.db)
            .await
            .map_err(ServiceError::from_update("farm"))?;
        let harvests = row.find_related(harvest::Entity).all(&self.db).await?;
        let mut stored = Farm::from(row);
        stored.harvests = harvests.into_iter().map(Into::into).collect();
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        farm::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Farm, ServiceError> {
        let row = farm::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("farm"))?;
        let mut trees = load_farm_trees(&self.db, vec![row]).await?;
        trees.pop().ok_or_else(|| ServiceError::not_found("farm"))
    }

    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farm>, u64), ServiceError> {
        let paginator = farm::Entity::find().paginate(&self.db, params.page_size());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;
        Ok((rows.into_iter().map(Farm::from).collect(), total))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(farm::Entity::find().count(&self.db).await?)
    }

    async fn sum_total_area(&self) -> Result<f64, ServiceError> {
        self.sum_column(farm::Column::TotalArea).await
    }

    async fn sum_agriculture_area(&self) -> Result<f64, ServiceError> {
        self.sum_column(farm::Column::AgricultureArea).await
    }

    async fn sum_vegetation_area(&self) -> Result<f64, ServiceError> {
        self.sum_column(farm::Column::VegetationArea).await
    }

    async fn count_by_state(&self) -> Result<Vec<StateCount>, ServiceError> {
        let rows = farm::Entity::find()
            .select_only()
            .column(farm::Column::State)
            .column_as(farm::Column::Id.count(), "count")
            .group_by(farm::Column::State)
            .into_model::<StateCount>()
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
    pub struct MockFarmRepository {
        farms: Mutex<BTreeMap<i32, Farm>>,
        next_id: Mutex<i32>,
        failure: Mutex<Option<String>>,
    }

    impl MockFarmRepository {
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

        fn sum(&self, pick: impl Fn(&Farm) -> f64) -> Result<f64, ServiceError> {
            self.check()?;
            Ok(self.farms.lock().unwrap().values().map(pick).sum())
        }
    }

    #[async_trait]
    impl FarmRepository for MockFarmRepository {
        async fn create(&self, mut farm: Farm) -> Result<Farm, ServiceError> {
            self.check()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            farm.id = *next;
            self.farms.lock().unwrap().insert(farm.id, farm.clone());
            Ok(farm)
        }

        async fn update(&self, farm: Farm) -> Result<Farm, ServiceError> {
            self.check()?;
            let mut farms = self.farms.lock().unwrap();
            let slot = farms.get_mut(&farm.id).ok_or_else(|| ServiceError::not_found("farm"))?;
            let harvests = std::mem::take(&mut slot.harvests);
            *slot = Farm { harvests, ..farm };
            Ok(slot.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.check()?;
            self.farms.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_by_id(&self, id: i32) -> Result<Farm, ServiceError> {
            self.check()?;
            self.farms.lock().unwrap().get(&id).cloned().ok_or_else(|| ServiceError::not_found("farm"))
        }

        async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farm>, u64), ServiceError> {
            self.check()?;
            let farms = self.farms.lock().unwrap();
            let page = farms
                .values()
                .skip(params.offset() as usize)
                .take(params.page_size() as usize)
                .map(|f| Farm { harvests: Vec::new(), ..f.clone() })
                .collect();
            Ok((page, farms.len() as u64))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            self.check()?;
            Ok(self.farms.lock().unwrap().len() as u64)
        }

        async fn sum_total_area(&self) -> Result<f64, ServiceError> { self.sum(|f| f.total_area) }

        async fn sum_agriculture_area(&self) -> Result<f64, ServiceError> { self.sum(|f| f.agriculture_area) }

        async fn sum_vegetation_area(&self) -> Result<f64, ServiceError> { self.sum(|f| f.vegetation_area) }

        async fn count_by_state(&self) -> Result<Vec<StateCount>, ServiceError> {
            self.check()?;
            let mut by_state: BTreeMap<String, i64> = BTreeMap::new();
            for f in self.farms.lock().unwrap().values() {
                *by_state.entry(f.state.clone()).or_default() += 1;
            }
            Ok(by_state.into_iter().map(|(state, count)| StateCount { state, count }).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::test_support::get_db;
    use models::Harvest;

    #[tokio::test]
    async fn farm_crud_with_harvests() -> Result<(), anyhow::Error> {
        let repo = SeaOrmFarmRepository::new(get_db().await?);

        let input = Farm::new("Boa Vista", "Campinas", "SP", 100.0, 60.0, 40.0)
            .with_harvests(vec![Harvest::new(2023, "Soja"), Harvest::new(2024, "Milho")]);
        let created = repo.create(input.clone()).await?;
        assert!(created.id > 0);
        assert_eq!(created.farmer_id, None);
        assert_eq!(created.harvests.len(), 2);
        assert!(created.harvests.iter().all(|h| h.farm_id == Some(created.id)));

        let found = repo.get_by_id(created.id).await?;
        assert_eq!(found.name, input.name);
        assert_eq!(found.total_area, input.total_area);
        let mut cultures: Vec<_> = found.harvests.iter().map(|h| h.culture.as_str()).collect();
        cultures.sort();
        assert_eq!(cultures, ["Milho", "Soja"]);

        let mut changed = found.clone();
        changed.name = "Boa Vista II".into();
        changed.total_area = 120.0;
        changed.vegetation_area = 60.0;
        changed.harvests.clear();
        let updated = repo.update(changed).await?;
        assert_eq!(updated.name, "Boa Vista II");
        assert_eq!(updated.total_area, 120.0);
        assert_eq!(updated.harvests.len(), 2, "harvests are managed separately");

        repo.delete(created.id).await?;
        assert!(matches!(repo.get_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        repo.delete(created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_farm_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmFarmRepository::new(get_db().await?);
        let mut ghost = Farm::new("Ghost", "Nowhere", "XX", 1.0, 1.0, 0.0);
        ghost.id = 4242;
        assert!(matches!(repo.update(ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_pages_without_harvests() -> Result<(), anyhow::Error> {
        let repo = SeaOrmFarmRepository::new(get_db().await?);
        for i in 0..12 {
            let f = Farm::new(format!("farm-{i}"), "Campinas", "SP", 10.0, 5.0, 5.0)
                .with_harvests(vec![Harvest::new(2024, "Soja")]);
            repo.create(f).await?;
        }

        let (page, total) = repo.get_all(PaginationParams::new(2, 5)).await?;
        assert_eq!(page.len(), 5);
        assert_eq!(total, 12);
        assert!(page.iter().all(|f| f.harvests.is_empty()));

        let (last, _) = repo.get_all(PaginationParams::new(3, 5)).await?;
        assert_eq!(last.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn aggregates_on_empty_table_are_zero() -> Result<(), anyhow::Error> {
        let repo = SeaOrmFarmRepository::new(get_db().await?);
        assert_eq!(repo.count().await?, 0);
        assert_eq!(repo.sum_total_area().await?, 0.0);
        assert_eq!(repo.sum_agriculture_area().await?, 0.0);
        assert_eq!(repo.sum_vegetation_area().await?, 0.0);
        assert!(repo.count_by_state().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn aggregates_are_computed_by_the_store() -> Result<(), anyhow::Error> {
        let repo = SeaOrmFarmRepository::new(get_db().await?);
        repo.create(Farm::new("A", "Campinas", "SP", 100.0, 60.0, 40.0)).await?;
        repo.create(Farm::new("B", "Ribeirão Preto", "SP", 50.0, 20.0, 30.0)).await?;
        repo.create(Farm::new("C", "Londrina", "PR", 10.0, 10.0, 0.0)).await?;

        assert_eq!(repo.count().await?, 3);
        assert_eq!(repo.sum_total_area().await?, 160.0);
        assert_eq!(repo.sum_agriculture_area().await?, 90.0);
        assert_eq!(repo.sum_vegetation_area().await?, 70.0);

        let by_state: HashMap<String, i64> =
            repo.count_by_state().await?.into_iter().map(|s| (s.state, s.count)).collect();
        assert_eq!(by_state, HashMap::from([("SP".to_string(), 2), ("PR".to_string(), 1)]));
        Ok(())
    }
}
