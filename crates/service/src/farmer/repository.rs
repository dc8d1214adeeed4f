use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use tracing::debug;

use models::{farm, farmer, Farmer};

use crate::errors::ServiceError;
use crate::farm::repository::{insert_farm_tree, load_farm_trees, restore_farm_tree};
use crate::pagination::PaginationParams;

/// Persistence capability for farmers. Reads return the full
/// farmer → farms → harvests tree.
#[async_trait]
pub trait FarmerRepository: Send + Sync {
    async fn create(&self, farmer: Farmer) -> Result<Farmer, ServiceError>;
    /// Replace the farmer and rebuild its farms from `farmer.farms`.
    ///
    /// Farms and harvests that carry an id keep it. Rows left out of the body
    /// are detached, not deleted.
    async fn update(&self, farmer: Farmer) -> Result<Farmer, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Farmer, ServiceError>;
    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farmer>, u64), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmFarmerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmFarmerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Load farms and harvests for every row in two extra queries, keeping the
/// order of `rows`.
async fn load_farmer_trees<C: ConnectionTrait>(
    db: &C,
    rows: Vec<farmer::Model>,
) -> Result<Vec<Farmer>, ServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let farms = rows.load_many(farm::Entity, db).await?;
    let sizes: Vec<usize> = farms.iter().map(Vec::len).collect();
    let mut trees = load_farm_trees(db, farms.into_iter().flatten().collect()).await?.into_iter();

    Ok(rows
        .into_iter()
        .zip(sizes)
        .map(|(row, n)| {
            let mut f = Farmer::from(row);
            f.farms = trees.by_ref().take(n).collect();
            f
        })
        .collect())
}

#[async_trait]
impl FarmerRepository for SeaOrmFarmerRepository {
    async fn create(&self, farmer: Farmer) -> Result<Farmer, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let txn = self.db.begin().await?;
        let row = farmer.to_new_active_model(now).insert(&txn).await?;
        let mut stored = Farmer::from(row);
        for f in &farmer.farms {
            let tree = insert_farm_tree(&txn, f, Some(stored.id), now).await?;
            stored.farms.push(tree);
        }
        txn.commit().await?;
        Ok(stored)
    }

    async fn update(&self, farmer: Farmer) -> Result<Farmer, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let txn = self.db.begin().await?;
        let dropped = farm::Entity::delete_many()
            .filter(farm::Column::FarmerId.eq(farmer.id))
            .exec(&txn)
            .await?;
        debug!(farmer_id = farmer.id, count = dropped.rows_affected, "farms dropped for rebuild");
        // a missing farmer rolls the delete back when `txn` is dropped
        let row = farmer
            .to_replace_active_model(now)
            .update(&txn)
            .await
            .map_err(ServiceError::from_update("farmer"))?;
        let mut stored = Farmer::from(row);
        for f in &farmer.farms {
            let tree = restore_farm_tree(&txn, f, Some(stored.id), now).await?;
            stored.farms.push(tree);
        }
        txn.commit().await?;
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        farmer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Farmer, ServiceError> {
        let row = farmer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("farmer"))?;
        let mut trees = load_farmer_trees(&self.db, vec![row]).await?;
        trees.pop().ok_or_else(|| ServiceError::not_found("farmer"))
    }

    async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farmer>, u64), ServiceError> {
        let paginator = farmer::Entity::find().paginate(&self.db, params.page_size());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;
        Ok((load_farmer_trees(&self.db, rows).await?, total))
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockFarmerRepository {
        farmers: Mutex<BTreeMap<i32, Farmer>>,
        next_id: Mutex<i32>,
    }

    impl MockFarmerRepository {
        fn next(&self) -> i32 {
            let mut n = self.next_id.lock().unwrap();
            *n += 1;
            *n
        }

        /// Assign ids down the tree the way the database would. With
        /// `keep_ids`, children that already carry an id hold on to it.
        fn stamp(&self, mut farmer: Farmer, keep_ids: bool) -> Farmer {
            for f in &mut farmer.farms {
                if !keep_ids || f.id == 0 {
                    f.id = self.next();
                }
                f.farmer_id = Some(farmer.id);
                for h in &mut f.harvests {
                    if !keep_ids || h.id == 0 {
                        h.id = self.next();
                    }
                    h.farm_id = Some(f.id);
                }
            }
            farmer
        }

        fn check_unique(&self, farmer: &Farmer) -> Result<(), ServiceError> {
            let taken = self.farmers.lock().unwrap().values().any(|f| {
                f.id != farmer.id && f.federal_identification == farmer.federal_identification
            });
            if taken {
                return Err(ServiceError::Db("duplicate federal identification".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl FarmerRepository for MockFarmerRepository {
        async fn create(&self, mut farmer: Farmer) -> Result<Farmer, ServiceError> {
            farmer.id = 0;
            self.check_unique(&farmer)?;
            farmer.id = self.next();
            let stored = self.stamp(farmer, false);
            self.farmers.lock().unwrap().insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, farmer: Farmer) -> Result<Farmer, ServiceError> {
            if !self.farmers.lock().unwrap().contains_key(&farmer.id) {
                return Err(ServiceError::not_found("farmer"));
            }
            self.check_unique(&farmer)?;
            let stored = self.stamp(farmer, true);
            self.farmers.lock().unwrap().insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.farmers.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_by_id(&self, id: i32) -> Result<Farmer, ServiceError> {
            self.farmers.lock().unwrap().get(&id).cloned().ok_or_else(|| ServiceError::not_found("farmer"))
        }

        async fn get_all(&self, params: PaginationParams) -> Result<(Vec<Farmer>, u64), ServiceError> {
            let farmers = self.farmers.lock().unwrap();
            let page = farmers
                .values()
                .skip(params.offset() as usize)
                .take(params.page_size() as usize)
                .cloned()
                .collect();
            Ok((page, farmers.len() as u64))
        }
    }
}
