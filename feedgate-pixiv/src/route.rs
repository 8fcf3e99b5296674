//! A user's novels as a feed.

use futures::future::try_join_all;
use htmlescape::encode_minimal;
use tracing::{info, instrument};

use feedgate_cache::CacheGate;
use feedgate_core::constants::{PIXIV_DEFAULT_LIMIT, PIXIV_MAX_LIMIT, PIXIV_WEB_URL};
use feedgate_core::error::{FeedError, Result};
use feedgate_core::types::{Feed, FeedItem};

use crate::client::PixivClient;
use crate::markup::novel_text_to_html;
use crate::types::PixivNovel;

impl PixivClient {
    /// Builds the feed of a user's latest novels with their full text.
    ///
    /// The token and `user_id` are checked before any request. Novel texts
    /// are fetched concurrently through `gate`; if any one fails the whole
    /// feed fails and no items are returned.
    #[instrument(skip(self, gate))]
    pub async fn user_novels_feed(
        &self,
        gate: &CacheGate,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Feed> {
        self.token()?;
        validate_user_id(user_id)?;
        let limit = limit.unwrap_or(PIXIV_DEFAULT_LIMIT).clamp(1, PIXIV_MAX_LIMIT);

        let listing = self.user_novels(user_id, limit).await?;

        let texts = try_join_all(listing.novels.iter().map(|novel| {
            let key = self.novel_text_url(novel.id);
            async move { gate.try_get(&key, || self.novel_text(novel.id), None).await }
        }))
        .await?;

        let items: Vec<FeedItem> = listing
            .novels
            .iter()
            .zip(texts.iter())
            .map(|(novel, text)| novel_item(novel, text))
            .collect();

        let user = &listing.user;
        info!(user_id, items = items.len(), "Built Pixiv user novels feed");

        let mut feed = Feed::new(
            format!("{}'s novels - pixiv", user.name),
            format!("{}/users/{}/novels", PIXIV_WEB_URL, user_id),
        )
        .with_description(format!("{} (@{}) novels on pixiv", user.name, user.account))
        .with_items(items);
        if let Some(avatar) = &user.profile_image_urls.medium {
            feed = feed.with_image(avatar.clone());
        }

        Ok(feed)
    }
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if !user_id.is_empty() && user_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FeedError::invalid_parameter(
            "id",
            format!("'{}' is not a numeric pixiv user ID", user_id),
        ))
    }
}

fn novel_item(novel: &PixivNovel, text: &str) -> FeedItem {
    let mut category: Vec<String> = novel.tags.iter().map(|t| t.name.clone()).collect();
    if let Some(label) = novel.restriction_label() {
        if !category.iter().any(|c| c == label) {
            category.push(label.to_string());
        }
    }

    FeedItem {
        title: novel.title.clone(),
        link: format!("{}/novel/show.php?id={}", PIXIV_WEB_URL, novel.id),
        description: render_description(novel, text),
        author: Some(novel.user.name.clone()),
        pub_date: Some(novel.create_date),
        category,
    }
}

fn render_description(novel: &PixivNovel, text: &str) -> String {
    let mut html = String::new();

    if let Some(cover) = novel.image_urls.large.as_ref().or(novel.image_urls.medium.as_ref()) {
        html.push_str(&format!("<img src=\"{}\"><br>", encode_minimal(cover)));
    }
    if !novel.caption.trim().is_empty() {
        // Captions arrive as HTML already.
        html.push_str(&format!("<p>{}</p>", novel.caption));
    }
    if let Some(series) = novel.series.as_ref().and_then(|s| s.title.as_ref()) {
        html.push_str(&format!("<p>Series: {}</p>", encode_minimal(series)));
    }
    html.push_str(&format!("<p>{} characters</p><hr>", novel.text_length));
    html.push_str(&novel_text_to_html(text));

    html
}
