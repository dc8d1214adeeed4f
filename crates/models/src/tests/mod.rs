//! Schema-level checks against an in-memory SQLite database with the real
//! migrations applied.

use anyhow::Result;
use chrono::Utc;
use configs::DatabaseConfig;
use sea_orm::{
    sea_query::ForeignKeyAction, ActiveModelTrait, DatabaseConnection, EntityTrait, RelationTrait,
};

use crate::db::connect_and_migrate;
use crate::{farm, farmer, harvest, Farm, Farmer, Harvest};

async fn setup_test_db() -> Result<DatabaseConnection> {
    connect_and_migrate(&DatabaseConfig::sqlite_memory()).await
}

async fn seed(db: &DatabaseConnection) -> Result<(farmer::Model, farm::Model, harvest::Model)> {
    let now = Utc::now().into();
    let fr = Farmer::new("Jane", "12345678901").to_new_active_model(now).insert(db).await?;
    let fm = Farm::new("Boa Vista", "Campinas", "SP", 100.0, 60.0, 40.0)
        .to_new_active_model(Some(fr.id), now)
        .insert(db)
        .await?;
    let hv = Harvest::new(2024, "Soja").to_new_active_model(Some(fm.id), now).insert(db).await?;
    Ok((fr, fm, hv))
}

#[test]
fn relations_follow_referential_policy() {
    let to_farmer = farm::Relation::Farmer.def();
    assert!(matches!(to_farmer.on_delete, Some(ForeignKeyAction::SetNull)));
    let to_farm = harvest::Relation::Farm.def();
    assert!(matches!(to_farm.on_delete, Some(ForeignKeyAction::SetNull)));
    assert!(matches!(migration::policy::FARM_ON_FARMER_DELETE, ForeignKeyAction::SetNull));
    assert!(matches!(migration::policy::HARVEST_ON_FARM_DELETE, ForeignKeyAction::SetNull));
}

#[tokio::test]
async fn deleting_farmer_detaches_farms() -> Result<()> {
    let db = setup_test_db().await?;
    let (fr, fm, _) = seed(&db).await?;

    farmer::Entity::delete_by_id(fr.id).exec(&db).await?;

    let orphan = farm::Entity::find_by_id(fm.id).one(&db).await?.expect("farm survives");
    assert_eq!(orphan.farmer_id, None);
    Ok(())
}

#[tokio::test]
async fn deleting_farm_detaches_harvests() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, fm, hv) = seed(&db).await?;

    farm::Entity::delete_by_id(fm.id).exec(&db).await?;

    let orphan = harvest::Entity::find_by_id(hv.id).one(&db).await?.expect("harvest survives");
    assert_eq!(orphan.farm_id, None);
    Ok(())
}

#[tokio::test]
async fn federal_identification_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let now = Utc::now().into();
    Farmer::new("Jane", "12345678901").to_new_active_model(now).insert(&db).await?;
    let dup = Farmer::new("John", "12345678901").to_new_active_model(now).insert(&db).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn model_round_trips_into_aggregate() -> Result<()> {
    let db = setup_test_db().await?;
    let (fr, fm, hv) = seed(&db).await?;

    let farmer: Farmer = fr.clone().into();
    assert_eq!(farmer.id, fr.id);
    assert_eq!(farmer.created_at, Some(fr.created_at));

    let farm: Farm = fm.into();
    assert_eq!(farm.farmer_id, Some(fr.id));
    assert_eq!(farm.agriculture_area, 60.0);

    let harvest: Harvest = hv.into();
    assert_eq!(harvest.culture, "Soja");
    Ok(())
}
