//! Shared constants for Feedgate routes.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for cached upstream results, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Default capacity of the in-memory cache store.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP
// ═══════════════════════════════════════════════════════════════════════════════

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// User agent for upstream requests that have no site-specific one.
pub const DEFAULT_USER_AGENT: &str = concat!("feedgate/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// SYOSETU
// ═══════════════════════════════════════════════════════════════════════════════

/// Narou novel API for the general site.
pub const SYOSETU_API_URL: &str = "https://api.syosetu.com/novelapi/api/";

/// Narou novel API for the adult sub-sites.
pub const SYOSETU_API18_URL: &str = "https://api.syosetu.com/novel18api/api/";

/// Largest page the Narou API will return.
pub const SYOSETU_MAX_LIMIT: u32 = 500;

/// Page size used when the request does not ask for one.
pub const SYOSETU_DEFAULT_LIMIT: u32 = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// PIXIV
// ═══════════════════════════════════════════════════════════════════════════════

/// Pixiv app API base URL.
pub const PIXIV_API_URL: &str = "https://app-api.pixiv.net";

/// Pixiv web host used for item links.
pub const PIXIV_WEB_URL: &str = "https://www.pixiv.net";

/// Novels returned when the request does not ask for a count.
pub const PIXIV_DEFAULT_LIMIT: usize = 10;

/// Upper bound on novels per feed (each costs a content request).
pub const PIXIV_MAX_LIMIT: usize = 100;
