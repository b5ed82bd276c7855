use axum::extract::{RawQuery, State};
use tracing::info;

use crate::api::dto::DifficultyDto;
use crate::api::PagedResponse;
use crate::database::list_page;
use crate::database::models::Difficulty;
use crate::error::ApiError;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/difficulties
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<PagedResponse<DifficultyDto>, ApiError> {
    let query = ListParams::from_query_string(raw.as_deref()).to_query::<Difficulty>(state.config.page_limits());
    let page = list_page(state.difficulties.as_ref(), &query).await?;

    info!(returned = page.items.len(), total = page.meta.total_count, "Listed difficulties");
    Ok(PagedResponse::new(page.map(DifficultyDto::from)))
}
