use sea_orm::{entity::prelude::*, FromQueryResult, NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{farmer, harvest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farm")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agriculture_area: f64,
    pub vegetation_area: f64,
    pub farmer_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Farmer,
    Harvest,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Farmer => Entity::belongs_to(farmer::Entity)
                .from(Column::FarmerId)
                .to(farmer::Column::Id)
                .on_delete(migration::policy::FARM_ON_FARMER_DELETE)
                .on_update(migration::policy::ON_PARENT_UPDATE)
                .into(),
            Relation::Harvest => Entity::has_many(harvest::Entity).into(),
        }
    }
}

impl Related<farmer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Farmer.def() }
}

impl Related<harvest::Entity> for Entity {
    fn to() -> RelationDef { Relation::Harvest.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// A land parcel and the harvests recorded on it.
///
/// `agriculture_area` travels as `arableArea` on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "farmName", default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "totalArea", default)]
    pub total_area: f64,
    #[serde(rename = "arableArea", alias = "agricultureArea", default)]
    pub agriculture_area: f64,
    #[serde(rename = "vegetationArea", default)]
    pub vegetation_area: f64,
    #[serde(default)]
    pub farmer_id: Option<i32>,
    #[serde(default)]
    pub harvests: Vec<harvest::Harvest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTimeWithTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Farm {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        total_area: f64,
        agriculture_area: f64,
        vegetation_area: f64,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            total_area,
            agriculture_area,
            vegetation_area,
            ..Self::default()
        }
    }

    pub fn with_harvests(mut self, harvests: Vec<harvest::Harvest>) -> Self {
        self.harvests = harvests;
        self
    }

    pub fn owned_by(mut self, farmer_id: i32) -> Self {
        self.farmer_id = Some(farmer_id);
        self
    }

    /// Check the farm and every nested harvest.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_fields()?;
        for h in &self.harvests {
            h.validate()?;
        }
        Ok(())
    }

    /// Check the farm's own columns only.
    ///
    /// The area sum is compared with `!=`: `0.1 + 0.2` against `0.3` fails.
    pub fn validate_fields(&self) -> Result<(), ModelError> {
        if self.name.is_empty() {
            return Err(ModelError::validation("farm name is required"));
        }
        if self.city.is_empty() {
            return Err(ModelError::validation("city is required"));
        }
        if self.state.is_empty() {
            return Err(ModelError::validation("state is required"));
        }
        if self.total_area <= 0.0 {
            return Err(ModelError::validation("total area must be greater than zero"));
        }
        if self.agriculture_area < 0.0 {
            return Err(ModelError::validation("agriculture area cannot be negative"));
        }
        if self.vegetation_area < 0.0 {
            return Err(ModelError::validation("vegetation area cannot be negative"));
        }
        if self.agriculture_area + self.vegetation_area != self.total_area {
            return Err(ModelError::validation(format!(
                "the sum of agriculture ({}) and vegetation ({}) areas must equal the total area ({})",
                self.agriculture_area, self.vegetation_area, self.total_area
            )));
        }
        Ok(())
    }

    /// Active model for an insert owned by `farmer_id`.
    pub fn to_new_active_model(&self, farmer_id: Option<i32>, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            total_area: Set(self.total_area),
            agriculture_area: Set(self.agriculture_area),
            vegetation_area: Set(self.vegetation_area),
            farmer_id: Set(farmer_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// Like [`Farm::to_new_active_model`], but a non-zero `self.id` is kept so
    /// a rebuilt farm returns under its previous id.
    pub fn to_restore_active_model(&self, farmer_id: Option<i32>, now: DateTimeWithTimeZone) -> ActiveModel {
        let mut am = self.to_new_active_model(farmer_id, now);
        if self.id != 0 {
            am.id = Set(self.id);
            am.created_at = Set(self.created_at.unwrap_or(now));
        }
        am
    }

    /// Active model overwriting every mutable column of row `self.id`.
    pub fn to_replace_active_model(&self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            total_area: Set(self.total_area),
            agriculture_area: Set(self.agriculture_area),
            vegetation_area: Set(self.vegetation_area),
            farmer_id: Set(self.farmer_id),
            created_at: NotSet,
            updated_at: Set(now),
        }
    }
}

impl From<Model> for Farm {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            city: m.city,
            state: m.state,
            total_area: m.total_area,
            agriculture_area: m.agriculture_area,
            vegetation_area: m.vegetation_area,
            farmer_id: m.farmer_id,
            harvests: Vec::new(),
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

/// Number of farms registered in one state.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: i64,
}
