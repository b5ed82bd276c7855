//! Transport objects. Responses are camelCase; request bodies also accept
//! PascalCase field names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::validation::Validator;
use crate::database::models::{Difficulty, Image, Region, Walk};
use crate::error::ApiError;

pub const MAX_WALK_LENGTH_KM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl From<Region> for RegionDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            code: region.code,
            name: region.name,
            region_image_url: region.region_image_url,
        }
    }
}

/// Body of region create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRequest {
    #[serde(default, alias = "Code")]
    pub code: String,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "RegionImageUrl")]
    pub region_image_url: Option<String>,
}

impl RegionRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required(&self.code, "code")
            .check(
                self.code.is_empty() || self.code.chars().count() == 3,
                "code",
                "Code has to be exactly 3 characters",
            )
            .required(&self.name, "name")
            .max_length(&self.name, 100, "name")
            .finish()
    }

    pub fn into_region(self) -> Region {
        Region {
            id: Uuid::nil(),
            code: self.code,
            name: self.name,
            region_image_url: self.region_image_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Difficulty> for DifficultyDto {
    fn from(difficulty: Difficulty) -> Self {
        Self {
            id: difficulty.id,
            name: difficulty.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
    pub region: Option<RegionDto>,
    pub difficulty: Option<DifficultyDto>,
}

impl WalkDto {
    pub fn new(walk: Walk, region: Option<Region>, difficulty: Option<Difficulty>) -> Self {
        Self {
            id: walk.id,
            name: walk.name,
            description: walk.description,
            length_in_km: walk.length_in_km,
            walk_image_url: walk.walk_image_url,
            region_id: walk.region_id,
            difficulty_id: walk.difficulty_id,
            region: region.map(RegionDto::from),
            difficulty: difficulty.map(DifficultyDto::from),
        }
    }
}

/// Body of walk create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRequest {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(alias = "LengthInKm")]
    pub length_in_km: f64,
    #[serde(default, alias = "WalkImageUrl")]
    pub walk_image_url: Option<String>,
    #[serde(alias = "RegionId")]
    pub region_id: Uuid,
    #[serde(alias = "DifficultyId")]
    pub difficulty_id: Uuid,
}

impl WalkRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required(&self.name, "name")
            .max_length(&self.name, 100, "name")
            .required(&self.description, "description")
            .max_length(&self.description, 1000, "description")
            .check(
                (0.0..=MAX_WALK_LENGTH_KM).contains(&self.length_in_km),
                "lengthInKm",
                format!("LengthInKm must be between 0 and {}", MAX_WALK_LENGTH_KM),
            )
            .check(!self.region_id.is_nil(), "regionId", "The RegionId field is required.")
            .check(!self.difficulty_id.is_nil(), "difficultyId", "The DifficultyId field is required.")
            .finish()
    }

    pub fn into_walk(self) -> Walk {
        Walk {
            id: Uuid::nil(),
            name: self.name,
            description: self.description,
            length_in_km: self.length_in_km,
            walk_image_url: self.walk_image_url.filter(|u| !u.trim().is_empty()),
            region_id: self.region_id,
            difficulty_id: self.difficulty_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: Uuid,
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: i64,
    pub file_path: String,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            file_name: image.file_name,
            file_description: image.file_description,
            file_extension: image.file_extension,
            file_size_in_bytes: image.file_size_in_bytes,
            file_path: image.file_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Password")]
    pub password: String,
    #[serde(default, alias = "Roles")]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Password")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
