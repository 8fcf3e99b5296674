//! Search results as a feed.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use tracing::{info, instrument};

use feedgate_cache::CacheGate;
use feedgate_core::error::Result;
use feedgate_core::types::{Feed, FeedItem};

use crate::client::{Novel, SyosetuClient};
use crate::options::SearchOptions;
use crate::render::render_description;
use crate::site::SearchSite;

const JST_OFFSET_SECONDS: i32 = 9 * 3600;

impl SyosetuClient {
    /// Runs a search and returns it as a feed.
    ///
    /// `sub` and the options in `query` are validated before any request is
    /// made. The upstream page is fetched through `gate`, keyed by its URL.
    #[instrument(skip(self, gate))]
    pub async fn search_feed(
        &self,
        gate: &CacheGate,
        sub: &str,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Feed> {
        let site: SearchSite = sub.parse()?;
        let options = SearchOptions::from_query(query)?;
        let api_url = self.search_url(site, &options, limit)?;

        let result = gate.try_get(&api_url, || self.search(&api_url), None).await?;

        let items: Vec<FeedItem> = result.novels.iter().map(|n| novel_item(site, n)).collect();

        info!(site = %site, items = items.len(), all_count = result.all_count, "Built Syosetu search feed");

        Ok(Feed::new(feed_title(&options), site.search_page_url(query)).with_items(items))
    }
}

/// Feed title: the search term, then the excluded term prefixed with `-`.
pub fn feed_title(options: &SearchOptions) -> String {
    let mut terms = Vec::new();
    if let Some(word) = &options.word {
        terms.push(word.clone());
    }
    if let Some(notword) = &options.notword {
        terms.push(format!("-{}", notword));
    }

    if terms.is_empty() {
        "Syosetu Search".to_string()
    } else {
        format!("Syosetu Search: {}", terms.join(" "))
    }
}

fn novel_item(site: SearchSite, novel: &Novel) -> FeedItem {
    FeedItem {
        title: novel.title.clone(),
        link: site.novel_url(&novel.ncode),
        description: render_description(novel),
        author: Some(novel.writer.clone()).filter(|w| !w.is_empty()),
        pub_date: novel.general_firstup.as_deref().and_then(parse_jst),
        category: split_keywords(&novel.keyword),
    }
}

fn parse_jst(s: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").ok()?;
    FixedOffset::east_opt(JST_OFFSET_SECONDS)?
        .from_local_datetime(&naive)
        .single()
}

fn split_keywords(keyword: &str) -> Vec<String> {
    keyword
        .split(|c: char| c.is_whitespace() || c == '/' || c == '／')
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
