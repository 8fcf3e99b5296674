//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use feedgate_core::Feed;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache_enabled: state.config.enable_cache,
        pixiv_configured: state.pixiv.has_token(),
    })
}

/// GET /syosetu/search/:sub/:query
pub async fn syosetu_search(
    State(state): State<Arc<AppState>>,
    Path((sub, query)): Path<(String, String)>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Feed>> {
    let start = Instant::now();
    let limit = params.limit()?;

    let feed = state
        .syosetu
        .search_feed(&state.gate, &sub, &query, limit)
        .await?;

    info!(
        sub = %sub,
        items = feed.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Served Syosetu search"
    );
    Ok(Json(feed))
}

/// GET /pixiv/user/novels/:id
pub async fn pixiv_user_novels(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Feed>> {
    let start = Instant::now();
    let limit = params.limit()?.map(|l| l as usize);

    let feed = state
        .pixiv
        .user_novels_feed(&state.gate, &id, limit)
        .await?;

    info!(
        user_id = %id,
        items = feed.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Served Pixiv user novels"
    );
    Ok(Json(feed))
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse {
        enabled: state.memory.is_some(),
        stats: state.memory.as_ref().map(|m| m.stats()),
    })
}
