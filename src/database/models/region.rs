use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::Entity;
use crate::query::{FieldDef, FieldValue, Listable, SqlParam};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Region {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl Listable for Region {
    const TABLE: &'static str = "regions";
    const SORT_FIELDS: &'static [FieldDef] = &[FieldDef::new("Name", "name"), FieldDef::new("Code", "code")];
    const FILTER_FIELDS: &'static [FieldDef] = &[FieldDef::new("Name", "name"), FieldDef::new("Code", "code")];

    fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        match column {
            "name" => Some(FieldValue::Text(&self.name)),
            "code" => Some(FieldValue::Text(&self.code)),
            _ => None,
        }
    }
}

impl Entity for Region {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, SqlParam)> {
        vec![
            ("id", SqlParam::Uuid(self.id)),
            ("code", SqlParam::Text(self.code.clone())),
            ("name", SqlParam::Text(self.name.clone())),
            ("region_image_url", SqlParam::OptText(self.region_image_url.clone())),
        ]
    }
}
