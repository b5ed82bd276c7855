use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::Entity;
use crate::query::{FieldDef, FieldValue, Listable, SqlParam};

/// Metadata of an uploaded image. The bytes live in image storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: Uuid,
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: i64,
    pub file_path: String,
}

impl Listable for Image {
    const TABLE: &'static str = "images";
    const SORT_FIELDS: &'static [FieldDef] = &[FieldDef::new("FileName", "file_name")];
    const FILTER_FIELDS: &'static [FieldDef] = &[FieldDef::new("FileName", "file_name")];

    fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        match column {
            "file_name" => Some(FieldValue::Text(&self.file_name)),
            _ => None,
        }
    }
}

impl Entity for Image {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, SqlParam)> {
        vec![
            ("id", SqlParam::Uuid(self.id)),
            ("file_name", SqlParam::Text(self.file_name.clone())),
            ("file_description", SqlParam::OptText(self.file_description.clone())),
            ("file_extension", SqlParam::Text(self.file_extension.clone())),
            ("file_size_in_bytes", SqlParam::Int(self.file_size_in_bytes)),
            ("file_path", SqlParam::Text(self.file_path.clone())),
        ]
    }
}
