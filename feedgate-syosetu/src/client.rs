//! Narou novel API client.
//!
//! The general site and the adult sub-sites are served by two API
//! endpoints with the same query language. Responses are JSON arrays whose
//! first element carries the total hit count.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use feedgate_core::constants::{
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, SYOSETU_API18_URL, SYOSETU_API_URL,
    SYOSETU_DEFAULT_LIMIT, SYOSETU_MAX_LIMIT,
};
use feedgate_core::error::{FeedError, Result};

use crate::options::SearchOptions;
use crate::site::SearchSite;

/// Output fields requested from the general API.
const GENERAL_FIELDS: &str = "t-n-w-s-g-k-gf-gl-nt-e-ga-l-gp-f";

/// Output fields requested from the R18 API (`ng` replaces `g`).
const ADULT_FIELDS: &str = "t-n-w-s-ng-k-gf-gl-nt-e-ga-l-gp-f";

/// Options the R18 API does not accept.
const GENERAL_ONLY_PARAMS: [&str; 2] = ["genre", "notgenre"];

/// Syosetu client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyosetuConfig {
    /// General novel API endpoint
    pub api_url: String,
    /// Adult novel API endpoint
    pub api18_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SyosetuConfig {
    fn default() -> Self {
        Self {
            api_url: SYOSETU_API_URL.into(),
            api18_url: SYOSETU_API18_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SyosetuConfig {
    /// Points both endpoints somewhere else (mirrors, test servers).
    pub fn with_endpoints(mut self, api_url: impl Into<String>, api18_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.api18_url = api18_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// One novel record from the search API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    /// Title
    pub title: String,
    /// Novel code, e.g. `N1234AB`
    pub ncode: String,
    /// Author display name
    #[serde(default)]
    pub writer: String,
    /// Synopsis
    #[serde(default)]
    pub story: String,
    /// Genre code (general API)
    #[serde(default)]
    pub genre: Option<u32>,
    /// Sub-site code (R18 API)
    #[serde(default)]
    pub nocgenre: Option<u32>,
    /// Space-separated keywords
    #[serde(default)]
    pub keyword: String,
    /// First publication, `YYYY-MM-DD HH:MM:SS` Japan time
    #[serde(default)]
    pub general_firstup: Option<String>,
    /// Last episode publication
    #[serde(default)]
    pub general_lastup: Option<String>,
    /// 1 = serial, 2 = short story
    #[serde(default)]
    pub novel_type: u8,
    /// 0 = short or completed, 1 = ongoing
    #[serde(default)]
    pub end: u8,
    /// Published episodes
    #[serde(default)]
    pub general_all_no: u32,
    /// Length in characters
    #[serde(default)]
    pub length: u64,
    /// Overall points
    #[serde(default)]
    pub global_point: u64,
    /// Bookmarks
    #[serde(default)]
    pub fav_novel_cnt: u64,
}

/// Parsed search response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total hits for the query, beyond this page
    pub all_count: u64,
    /// Novels on this page
    pub novels: Vec<Novel>,
}

#[derive(Deserialize)]
struct CountHeader {
    allcount: u64,
}

/// Client for the Narou search API.
pub struct SyosetuClient {
    config: SyosetuConfig,
    http_client: reqwest::Client,
}

impl SyosetuClient {
    /// Creates a client with default endpoints.
    pub fn new() -> Result<Self> {
        Self::with_config(SyosetuConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: SyosetuConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Builds the upstream search URL. This string is also the cache key.
    ///
    /// Parameter order is fixed so identical searches produce identical URLs.
    pub fn search_url(&self, site: SearchSite, options: &SearchOptions, limit: Option<u32>) -> Result<String> {
        let (base, fields) = if site.is_adult() {
            (&self.config.api18_url, ADULT_FIELDS)
        } else {
            (&self.config.api_url, GENERAL_FIELDS)
        };

        let mut url = Url::parse(base)
            .map_err(|e| FeedError::Config(format!("invalid Syosetu API URL '{}': {}", base, e)))?;

        let limit = limit
            .unwrap_or(SYOSETU_DEFAULT_LIMIT)
            .clamp(1, SYOSETU_MAX_LIMIT);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("out", "json");
            pairs.append_pair("lim", &limit.to_string());
            pairs.append_pair("of", fields);
            for (name, value) in options.api_params() {
                // The R18 API has no general genres; sub-sites go through `nocgenre`.
                if site.is_adult() && GENERAL_ONLY_PARAMS.contains(&name) {
                    debug!(site = %site, param = name, "Dropping general-only search option");
                    continue;
                }
                pairs.append_pair(name, &value);
            }
            if let Some(nocgenre) = site.nocgenre() {
                pairs.append_pair("nocgenre", nocgenre);
            }
        }

        Ok(url.into())
    }

    /// Fetches and parses one search page.
    #[instrument(skip(self))]
    pub async fn search(&self, url: &str) -> Result<SearchResult> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::upstream("syosetu search", e))?;

        if !response.status().is_success() {
            return Err(FeedError::upstream(
                "syosetu search",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| FeedError::upstream("syosetu search", e))?;

        let result = parse_search_body(body)?;
        debug!(all_count = result.all_count, returned = result.novels.len(), "Syosetu search page");
        Ok(result)
    }
}

fn parse_search_body(body: Vec<serde_json::Value>) -> Result<SearchResult> {
    let mut records = body.into_iter();

    let header = records
        .next()
        .ok_or_else(|| FeedError::upstream("syosetu search", "empty response"))?;
    let CountHeader { allcount } = serde_json::from_value(header)
        .map_err(|e| FeedError::upstream("syosetu search", format!("missing allcount: {}", e)))?;

    let novels = records
        .map(serde_json::from_value::<Novel>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| FeedError::upstream("syosetu search", format!("bad novel record: {}", e)))?;

    Ok(SearchResult {
        all_count: allcount,
        novels,
    })
}
