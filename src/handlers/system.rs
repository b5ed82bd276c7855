use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "NZ Walks API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Regions, walks and images of New Zealand walking tracks",
        "endpoints": {
            "auth": "/api/auth/register, /api/auth/login (public)",
            "regions": "/api/regions[/:id] (Reader, Writer)",
            "walks": "/api/walks[/:id] (Reader, Writer)",
            "difficulties": "/api/difficulties (Reader, Writer)",
            "images": "/api/images/upload (Writer), /images/:file (public)",
            "health": "/health (public)"
        },
        "query": ["sortBy", "isAscending", "pageNumber", "pageSize", "filterOn", "filterQuery"]
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.regions.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
