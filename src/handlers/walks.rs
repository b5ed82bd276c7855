use std::collections::HashMap;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::dto::{WalkDto, WalkRequest};
use crate::api::validation::Validator;
use crate::api::{ApiJson, PagedResponse};
use crate::database::list_page;
use crate::database::models::{Difficulty, Region, Walk};
use crate::error::ApiError;
use crate::query::{ListParams, Page};
use crate::state::AppState;

use super::parse_id;

/// Resolves the region and difficulty of each walk, looking each id up once.
struct Expander<'a> {
    state: &'a AppState,
    regions: HashMap<Uuid, Option<Region>>,
    difficulties: HashMap<Uuid, Option<Difficulty>>,
}

impl<'a> Expander<'a> {
    fn new(state: &'a AppState) -> Self {
        Self {
            state,
            regions: HashMap::new(),
            difficulties: HashMap::new(),
        }
    }

    async fn expand(&mut self, walk: Walk) -> Result<WalkDto, ApiError> {
        if !self.regions.contains_key(&walk.region_id) {
            let region = self.state.regions.get_by_id(walk.region_id).await?;
            self.regions.insert(walk.region_id, region);
        }
        if !self.difficulties.contains_key(&walk.difficulty_id) {
            let difficulty = self.state.difficulties.get_by_id(walk.difficulty_id).await?;
            self.difficulties.insert(walk.difficulty_id, difficulty);
        }

        let region = self.regions.get(&walk.region_id).cloned().flatten();
        let difficulty = self.difficulties.get(&walk.difficulty_id).cloned().flatten();
        Ok(WalkDto::new(walk, region, difficulty))
    }

    async fn expand_page(&mut self, page: Page<Walk>) -> Result<Page<WalkDto>, ApiError> {
        let mut items = Vec::with_capacity(page.items.len());
        for walk in page.items {
            items.push(self.expand(walk).await?);
        }
        Ok(Page { items, meta: page.meta })
    }
}

/// Region and difficulty must name existing records.
async fn check_references(state: &AppState, request: &WalkRequest) -> Result<(), ApiError> {
    let region_exists = state.regions.get_by_id(request.region_id).await?.is_some();
    let difficulty_exists = state.difficulties.get_by_id(request.difficulty_id).await?.is_some();
    Validator::new()
        .check(region_exists, "regionId", format!("Region {} does not exist", request.region_id))
        .check(
            difficulty_exists,
            "difficultyId",
            format!("Difficulty {} does not exist", request.difficulty_id),
        )
        .finish()
}

/// GET /api/walks
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<PagedResponse<WalkDto>, ApiError> {
    let query = ListParams::from_query_string(raw.as_deref()).to_query::<Walk>(state.config.page_limits());
    let page = list_page(state.walks.as_ref(), &query).await?;

    info!(
        returned = page.items.len(),
        total = page.meta.total_count,
        page = page.meta.page_number,
        "Listed walks"
    );
    let page = Expander::new(&state).expand_page(page).await?;
    Ok(PagedResponse::new(page))
}

/// GET /api/walks/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<WalkDto>, ApiError> {
    let id = parse_id(&id, "Walk")?;
    match state.walks.get_by_id(id).await? {
        Some(walk) => Ok(Json(Expander::new(&state).expand(walk).await?)),
        None => {
            warn!(%id, "Walk not found");
            Err(ApiError::not_found("Walk not found"))
        }
    }
}

/// POST /api/walks
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<WalkRequest>,
) -> Result<Json<WalkDto>, ApiError> {
    request.validate()?;
    check_references(&state, &request).await?;

    let walk = state.walks.insert(request.into_walk()).await?;
    info!(id = %walk.id, name = %walk.name, "Created walk");
    Ok(Json(Expander::new(&state).expand(walk).await?))
}

/// PUT /api/walks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<WalkRequest>,
) -> Result<Json<WalkDto>, ApiError> {
    let id = parse_id(&id, "Walk")?;
    request.validate()?;
    check_references(&state, &request).await?;

    match state.walks.update(id, request.into_walk()).await? {
        Some(walk) => {
            info!(%id, "Updated walk");
            Ok(Json(Expander::new(&state).expand(walk).await?))
        }
        None => {
            warn!(%id, "Walk not found for update");
            Err(ApiError::not_found("Walk not found"))
        }
    }
}

/// DELETE /api/walks/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "Walk")?;
    match state.walks.delete(id).await? {
        Some(walk) => {
            info!(%id, name = %walk.name, "Deleted walk");
            Ok(StatusCode::NO_CONTENT)
        }
        None => {
            warn!(%id, "Walk not found for delete");
            Err(ApiError::not_found("Walk not found"))
        }
    }
}
