//! Pixiv app API client.
//!
//! Every call carries the configured access token. Obtaining and refreshing
//! that token happens elsewhere; without one the client refuses to make
//! requests.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use feedgate_core::constants::{DEFAULT_TIMEOUT_SECONDS, PIXIV_API_URL};
use feedgate_core::error::{FeedError, Result};

use crate::types::{NovelText, UserNovels, UserNovelsPage};

const APP_OS: &str = "ios";
const APP_OS_VERSION: &str = "14.6";
const APP_VERSION: &str = "7.13.3";
const APP_USER_AGENT: &str = "PixivIOSApp/7.13.3 (iOS 14.6; iPhone13,2)";

/// Most listing pages fetched for one feed.
pub const MAX_LISTING_PAGES: usize = 10;

/// Pixiv client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PixivConfig {
    /// App API base URL
    pub api_url: String,
    /// OAuth access token for the app API
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PixivConfig {
    fn default() -> Self {
        Self {
            api_url: PIXIV_API_URL.into(),
            access_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl PixivConfig {
    /// Sets the access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Points the client at another API host.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Client for the Pixiv app API.
pub struct PixivClient {
    config: PixivConfig,
    http_client: reqwest::Client,
}

impl PixivClient {
    /// Creates a client with custom configuration.
    pub fn with_config(config: PixivConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns true if an access token is configured.
    pub fn has_token(&self) -> bool {
        self.token().is_ok()
    }

    pub(crate) fn token(&self) -> Result<&str> {
        self.config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FeedError::Config("PIXIV_ACCESS_TOKEN is not set".into()))
    }

    fn base(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// First page of a user's novel list.
    pub fn user_novels_url(&self, user_id: &str) -> String {
        format!("{}/v1/user/novels?user_id={}&filter=for_ios", self.base(), user_id)
    }

    /// Full-text endpoint for one novel. Also the cache key for its text.
    pub fn novel_text_url(&self, novel_id: u64) -> String {
        format!("{}/v1/novel/text?novel_id={}", self.base(), novel_id)
    }

    /// Lists up to `limit` of a user's novels, following `next_url` as needed.
    ///
    /// Any page failure fails the whole listing.
    #[instrument(skip(self))]
    pub async fn user_novels(&self, user_id: &str, limit: usize) -> Result<UserNovels> {
        let token = self.token()?;

        let mut url = self.user_novels_url(user_id);
        let mut user = None;
        let mut novels = Vec::new();
        let mut pages = 0;

        loop {
            let page: UserNovelsPage = self
                .get_json(&url, token, &format!("novel list of user {}", user_id))
                .await?;
            pages += 1;
            let page_len = page.novels.len();
            debug!(user_id, page = pages, page_len, "Fetched novel list page");

            user.get_or_insert(page.user);
            novels.extend(page.novels);

            if novels.len() >= limit || page_len == 0 {
                break;
            }
            let Some(next) = page.next_url else { break };
            if pages >= MAX_LISTING_PAGES {
                warn!(user_id, pages, "Novel listing stopped at the page cap");
                break;
            }
            if !self.is_api_origin(&next) {
                warn!(next_url = %next, "Not following next_url outside the API host");
                break;
            }
            url = next;
        }

        novels.truncate(limit);
        let user = user.ok_or_else(|| FeedError::Internal("novel listing returned no pages".into()))?;

        Ok(UserNovels { user, novels })
    }

    /// True if `url` has the configured API's scheme, host and port.
    fn is_api_origin(&self, url: &str) -> bool {
        match (Url::parse(&self.config.api_url), Url::parse(url)) {
            (Ok(base), Ok(next)) => {
                base.scheme() == next.scheme()
                    && base.host_str() == next.host_str()
                    && base.port_or_known_default() == next.port_or_known_default()
            }
            _ => false,
        }
    }

    /// Fetches the raw text of one novel.
    #[instrument(skip(self))]
    pub async fn novel_text(&self, novel_id: u64) -> Result<String> {
        let token = self.token()?;
        let body: NovelText = self
            .get_json(&self.novel_text_url(novel_id), token, &format!("text of novel {}", novel_id))
            .await?;
        Ok(body.novel_text)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str, context: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .header("App-OS", APP_OS)
            .header("App-OS-Version", APP_OS_VERSION)
            .header("App-Version", APP_VERSION)
            .send()
            .await
            .map_err(|e| FeedError::upstream(context, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FeedError::upstream(
                context,
                format!("HTTP {}: {}", status, text.chars().take(200).collect::<String>()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::upstream(context, e))
    }
}
