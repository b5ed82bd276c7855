use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::Entity;
use crate::query::{FieldDef, FieldValue, Listable, SqlParam};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Difficulty {
    pub id: Uuid,
    pub name: String,
}

impl Listable for Difficulty {
    const TABLE: &'static str = "difficulties";
    const SORT_FIELDS: &'static [FieldDef] = &[FieldDef::new("Name", "name")];
    const FILTER_FIELDS: &'static [FieldDef] = &[FieldDef::new("Name", "name")];

    fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        match column {
            "name" => Some(FieldValue::Text(&self.name)),
            _ => None,
        }
    }
}

impl Entity for Difficulty {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, SqlParam)> {
        vec![("id", SqlParam::Uuid(self.id)), ("name", SqlParam::Text(self.name.clone()))]
    }
}
