//! App state: shared cache gate, route clients, config.

use std::sync::Arc;

use feedgate_cache::{CacheConfig, CacheGate, MemoryStore};
use feedgate_core::constants::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_TIMEOUT_SECONDS, PIXIV_API_URL,
    SYOSETU_API18_URL, SYOSETU_API_URL,
};
use feedgate_core::{CacheStore, Result};
use feedgate_pixiv::{PixivClient, PixivConfig};
use feedgate_syosetu::{SyosetuClient, SyosetuConfig};

/// Server configuration, normally read from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Whether route results are cached at all
    pub enable_cache: bool,
    /// Default cache TTL in seconds
    pub cache_ttl_seconds: u64,
    /// Upper bound on cached entries
    pub cache_max_entries: usize,
    /// Narou general search endpoint
    pub syosetu_api_url: String,
    /// Narou R18 search endpoint
    pub syosetu_api18_url: String,
    /// Pixiv app API base URL
    pub pixiv_api_url: String,
    /// Pixiv access token; the Pixiv route answers 503 without one
    pub pixiv_access_token: Option<String>,
    /// Upstream request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            syosetu_api_url: SYOSETU_API_URL.into(),
            syosetu_api18_url: SYOSETU_API18_URL.into(),
            pixiv_api_url: PIXIV_API_URL.into(),
            pixiv_access_token: None,
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, loading `.env` first.
    ///
    /// Unset or unparsable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            enable_cache: std::env::var("ENABLE_CACHE")
                .map(|v| flag(&v))
                .unwrap_or(defaults.enable_cache),
            cache_ttl_seconds: env_number("CACHE_TTL_SECONDS").unwrap_or(defaults.cache_ttl_seconds),
            cache_max_entries: env_number("CACHE_MAX_ENTRIES").unwrap_or(defaults.cache_max_entries),
            syosetu_api_url: std::env::var("SYOSETU_API_URL").unwrap_or(defaults.syosetu_api_url),
            syosetu_api18_url: std::env::var("SYOSETU_API18_URL")
                .unwrap_or(defaults.syosetu_api18_url),
            pixiv_api_url: std::env::var("PIXIV_API_URL").unwrap_or(defaults.pixiv_api_url),
            pixiv_access_token: std::env::var("PIXIV_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            request_timeout_seconds: env_number("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Sets the Pixiv access token.
    pub fn with_pixiv_token(mut self, token: impl Into<String>) -> Self {
        self.pixiv_access_token = Some(token.into());
        self
    }

    /// Turns caching off.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}

fn flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off")
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// State shared by every request.
pub struct AppState {
    /// Effective configuration
    pub config: ApiConfig,
    /// The one cache gate all routes fetch through
    pub gate: CacheGate,
    /// The gate's backing store, kept for stats; `None` when caching is off
    pub memory: Option<Arc<MemoryStore>>,
    /// Syosetu route client
    pub syosetu: SyosetuClient,
    /// Pixiv route client
    pub pixiv: PixivClient,
}

impl AppState {
    /// Builds the cache and route clients from `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let cache_config = CacheConfig {
            max_entries: config.cache_max_entries,
            default_ttl_seconds: config.cache_ttl_seconds,
            ..Default::default()
        };

        let (gate, memory) = if config.enable_cache {
            let ttl = cache_config.default_ttl();
            let store = Arc::new(MemoryStore::with_config(cache_config));
            let backend: Arc<dyn CacheStore> = store.clone();
            (CacheGate::new(backend, ttl), Some(store))
        } else {
            (CacheGate::disabled(), None)
        };

        let syosetu = SyosetuClient::with_config(
            SyosetuConfig::default()
                .with_endpoints(&config.syosetu_api_url, &config.syosetu_api18_url)
                .with_timeout(config.request_timeout_seconds),
        )?;

        let mut pixiv_config = PixivConfig::default()
            .with_api_url(&config.pixiv_api_url)
            .with_timeout(config.request_timeout_seconds);
        if let Some(token) = &config.pixiv_access_token {
            pixiv_config = pixiv_config.with_access_token(token);
        }
        let pixiv = PixivClient::with_config(pixiv_config)?;

        Ok(Self {
            config,
            gate,
            memory,
            syosetu,
            pixiv,
        })
    }
}
