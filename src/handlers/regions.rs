use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::api::dto::{RegionDto, RegionRequest};
use crate::api::{ApiJson, Created, PagedResponse};
use crate::database::list_page;
use crate::database::models::Region;
use crate::error::ApiError;
use crate::query::ListParams;
use crate::state::AppState;

use super::parse_id;

/// GET /api/regions
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<PagedResponse<RegionDto>, ApiError> {
    let query = ListParams::from_query_string(raw.as_deref()).to_query::<Region>(state.config.page_limits());
    let page = list_page(state.regions.as_ref(), &query).await?;

    info!(
        returned = page.items.len(),
        total = page.meta.total_count,
        page = page.meta.page_number,
        "Listed regions"
    );
    Ok(PagedResponse::new(page.map(RegionDto::from)))
}

/// GET /api/regions/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<RegionDto>, ApiError> {
    let id = parse_id(&id, "Region")?;
    match state.regions.get_by_id(id).await? {
        Some(region) => Ok(Json(region.into())),
        None => {
            warn!(%id, "Region not found");
            Err(ApiError::not_found("Region not found"))
        }
    }
}

/// POST /api/regions
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegionRequest>,
) -> Result<Created<RegionDto>, ApiError> {
    request.validate()?;
    let region = state.regions.insert(request.into_region()).await?;

    info!(id = %region.id, code = %region.code, "Created region");
    Ok(Created {
        location: format!("/api/regions/{}", region.id),
        body: region.into(),
    })
}

/// PUT /api/regions/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<RegionRequest>,
) -> Result<Json<RegionDto>, ApiError> {
    let id = parse_id(&id, "Region")?;
    request.validate()?;

    match state.regions.update(id, request.into_region()).await? {
        Some(region) => {
            info!(%id, "Updated region");
            Ok(Json(region.into()))
        }
        None => {
            warn!(%id, "Region not found for update");
            Err(ApiError::not_found("Region not found"))
        }
    }
}

/// DELETE /api/regions/:id
///
/// Walks in the region go with it. The region row is removed first, so a
/// failed delete leaves its walks untouched; in Postgres the foreign key
/// cascades in the same statement and the sweep below finds nothing.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "Region")?;

    let Some(region) = state.regions.delete(id).await? else {
        warn!(%id, "Region not found for delete");
        return Err(ApiError::not_found("Region not found"));
    };
    let walks_removed = state.walks.delete_where("region_id", id).await?;

    info!(%id, code = %region.code, walks_removed, "Deleted region");
    Ok(StatusCode::NO_CONTENT)
}
