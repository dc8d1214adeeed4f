use sea_orm::{entity::prelude::*, NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::farm;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farmer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub federal_identification: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Farm,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Farm => Entity::has_many(farm::Entity).into() }
    }
}

impl Related<farm::Entity> for Entity {
    fn to() -> RelationDef { Relation::Farm.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accepted lengths of a federal identification: CPF (11) and CNPJ (14).
pub const FEDERAL_ID_LENGTHS: [usize; 2] = [11, 14];

/// A farmer together with the farms (and their harvests) it owns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "farmerName", default)]
    pub name: String,
    #[serde(rename = "federalIdentification", default)]
    pub federal_identification: String,
    #[serde(default)]
    pub farms: Vec<farm::Farm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTimeWithTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Farmer {
    pub fn new(name: impl Into<String>, federal_identification: impl Into<String>) -> Self {
        Self { name: name.into(), federal_identification: federal_identification.into(), ..Self::default() }
    }

    pub fn with_farms(mut self, farms: Vec<farm::Farm>) -> Self {
        self.farms = farms;
        self
    }

    /// Check the farmer and every nested farm; the first broken rule wins.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_federal_identification(&self.federal_identification)?;
        for f in &self.farms {
            f.validate()?;
        }
        Ok(())
    }

    /// Active model for an insert; the id is left to the database.
    pub fn to_new_active_model(&self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            federal_identification: Set(self.federal_identification.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// Active model overwriting every mutable column of row `self.id`.
    pub fn to_replace_active_model(&self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            federal_identification: Set(self.federal_identification.clone()),
            created_at: NotSet,
            updated_at: Set(now),
        }
    }
}

impl From<Model> for Farmer {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            federal_identification: m.federal_identification,
            farms: Vec::new(),
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::validation("farmer name is required"));
    }
    Ok(())
}

pub fn validate_federal_identification(doc: &str) -> Result<(), ModelError> {
    if doc.is_empty() {
        return Err(ModelError::validation("federal identification is required"));
    }
    let len = doc.chars().count();
    if !FEDERAL_ID_LENGTHS.contains(&len) {
        return Err(ModelError::validation(format!(
            "federal identification must have 11 (CPF) or 14 (CNPJ) characters, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(f: &Farmer) -> String {
        match f.validate() {
            Err(ModelError::Validation(r)) => r,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_cpf_and_cnpj_lengths() {
        assert!(Farmer::new("Jane", "12345678901").validate().is_ok());
        assert!(Farmer::new("Acme Agro", "12345678000199").validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(reason(&Farmer::new("", "12345678901")).contains("name"));
    }

    #[test]
    fn rejects_empty_document() {
        assert!(reason(&Farmer::new("Jane", "")).contains("required"));
    }

    #[test]
    fn rejects_every_other_length() {
        for len in (1..=20).filter(|l| !FEDERAL_ID_LENGTHS.contains(l)) {
            let doc = "9".repeat(len);
            let r = reason(&Farmer::new("Jane", doc));
            assert!(r.contains("11 (CPF) or 14 (CNPJ)"), "len {len}: {r}");
        }
    }

    #[test]
    fn invalid_nested_farm_fails_the_farmer() {
        let bad = farm::Farm::new("Boa Vista", "Campinas", "SP", 100.0, 60.0, 30.0);
        let f = Farmer::new("Jane", "12345678901").with_farms(vec![bad]);
        assert!(reason(&f).contains("sum"));
    }

    #[test]
    fn json_uses_api_field_names() {
        let f: Farmer = serde_json::from_value(serde_json::json!({
            "farmerName": "Jane",
            "federalIdentification": "12345678901",
            "farms": [{
                "farmName": "Boa Vista", "city": "Campinas", "state": "SP",
                "totalArea": 100.0, "arableArea": 60.0, "vegetationArea": 40.0
            }]
        })).unwrap();
        assert_eq!(f.id, 0);
        assert_eq!(f.name, "Jane");
        assert_eq!(f.farms[0].agriculture_area, 60.0);
        let back = serde_json::to_value(&f).unwrap();
        assert_eq!(back["farmerName"], "Jane");
        assert_eq!(back["federalIdentification"], "12345678901");
        assert!(back.get("created_at").is_none());
    }
}
