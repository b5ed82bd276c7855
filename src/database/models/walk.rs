use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::Entity;
use crate::query::{FieldDef, FieldValue, Listable, SqlParam};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Walk {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

impl Listable for Walk {
    const TABLE: &'static str = "walks";
    const SORT_FIELDS: &'static [FieldDef] = &[
        FieldDef::new("Name", "name"),
        FieldDef::number("Length", "length_in_km"),
        FieldDef::number("LengthInKm", "length_in_km"),
    ];
    const FILTER_FIELDS: &'static [FieldDef] = &[FieldDef::new("Name", "name")];

    fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        match column {
            "name" => Some(FieldValue::Text(&self.name)),
            "length_in_km" => Some(FieldValue::Number(self.length_in_km)),
            _ => None,
        }
    }
}

impl Entity for Walk {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, SqlParam)> {
        vec![
            ("id", SqlParam::Uuid(self.id)),
            ("name", SqlParam::Text(self.name.clone())),
            ("description", SqlParam::Text(self.description.clone())),
            ("length_in_km", SqlParam::Float(self.length_in_km)),
            ("walk_image_url", SqlParam::OptText(self.walk_image_url.clone())),
            ("region_id", SqlParam::Uuid(self.region_id)),
            ("difficulty_id", SqlParam::Uuid(self.difficulty_id)),
        ]
    }
}
