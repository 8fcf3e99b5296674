//! Request and response bodies that are not feeds.

use feedgate_cache::CacheStats;
use feedgate_core::{FeedError, Result};
use serde::{Deserialize, Serialize};

/// `?limit=N` on the feed routes.
///
/// Kept as text so a bad value surfaces as a JSON error from the handler.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    /// Parsed limit; absent or empty means the route default.
    pub fn limit(&self) -> Result<Option<u32>> {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                FeedError::invalid_parameter("limit", format!("'{}' is not a positive integer", raw))
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cache_enabled: bool,
    pub pixiv_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CacheStats>,
}
