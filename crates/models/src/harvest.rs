use sea_orm::{entity::prelude::*, FromQueryResult, NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::farm;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "harvest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub culture: String,
    pub farm_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Farm }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Farm => Entity::belongs_to(farm::Entity)
                .from(Column::FarmId)
                .to(farm::Column::Id)
                .on_delete(migration::policy::HARVEST_ON_FARM_DELETE)
                .on_update(migration::policy::ON_PARENT_UPDATE)
                .into(),
        }
    }
}

impl Related<farm::Entity> for Entity {
    fn to() -> RelationDef { Relation::Farm.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// One crop season: what was grown and when.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Harvest {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub culture: String,
    #[serde(default)]
    pub farm_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTimeWithTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Harvest {
    pub fn new(year: i32, culture: impl Into<String>) -> Self {
        Self { year, culture: culture.into(), ..Self::default() }
    }

    pub fn on_farm(mut self, farm_id: i32) -> Self {
        self.farm_id = Some(farm_id);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.year <= 0 {
            return Err(ModelError::validation("harvest year must be greater than zero"));
        }
        if self.culture.is_empty() {
            return Err(ModelError::validation("culture is required"));
        }
        Ok(())
    }

    pub fn to_new_active_model(&self, farm_id: Option<i32>, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            year: Set(self.year),
            culture: Set(self.culture.clone()),
            farm_id: Set(farm_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// Like [`Harvest::to_new_active_model`], but a non-zero `self.id` is kept
    /// so the row can be upserted onto its previous id.
    pub fn to_restore_active_model(&self, farm_id: Option<i32>, now: DateTimeWithTimeZone) -> ActiveModel {
        let mut am = self.to_new_active_model(farm_id, now);
        if self.id != 0 {
            am.id = Set(self.id);
            am.created_at = Set(self.created_at.unwrap_or(now));
        }
        am
    }

    pub fn to_replace_active_model(&self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            year: Set(self.year),
            culture: Set(self.culture.clone()),
            farm_id: Set(self.farm_id),
            created_at: NotSet,
            updated_at: Set(now),
        }
    }
}

impl From<Model> for Harvest {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            year: m.year,
            culture: m.culture,
            farm_id: m.farm_id,
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

/// Number of harvests recorded for one culture.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CultureCount {
    pub culture: String,
    pub count: i64,
}
