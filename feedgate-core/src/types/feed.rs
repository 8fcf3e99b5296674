//! Normalized feed payload.
//!
//! This is the shape handed to the feed serialization layer (RSS, Atom,
//! JSON Feed). Routes build it fresh on every successful invocation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A feed returned by a route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Feed title
    pub title: String,
    /// Canonical page this feed mirrors
    pub link: String,
    /// Optional feed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional feed image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Feed entries, in upstream order
    pub item: Vec<FeedItem>,
}

impl Feed {
    /// Creates an empty feed.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: None,
            image: None,
            item: Vec::new(),
        }
    }

    /// Sets the feed description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the feed image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Replaces the feed entries.
    pub fn with_items(mut self, items: Vec<FeedItem>) -> Self {
        self.item = items;
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.item.len()
    }

    /// Returns true if the feed has no entries.
    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }
}

/// One normalized entry of a feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Entry title
    pub title: String,
    /// Canonical external URL
    pub link: String,
    /// Rendered HTML body
    pub description: String,
    /// Author display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publish time
    #[serde(rename = "pubDate", default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<FixedOffset>>,
    /// Category labels
    #[serde(default)]
    pub category: Vec<String>,
}

impl FeedItem {
    /// Creates an item with an empty description and no metadata.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: String::new(),
            author: None,
            pub_date: None,
            category: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_serializes_output_contract() {
        let mut item = FeedItem::new("Chapter 1", "https://example.com/1");
        item.author = Some("alice".into());
        item.pub_date = Some(DateTime::parse_from_rfc3339("2024-05-01T12:00:00+09:00").unwrap());
        item.category = vec!["fantasy".into()];

        let feed = Feed::new("Example", "https://example.com").with_items(vec![item]);
        let json: serde_json::Value = serde_json::to_value(&feed).unwrap();

        assert_eq!(json["title"], "Example");
        assert!(json.get("image").is_none());
        assert_eq!(json["item"][0]["author"], "alice");
        assert_eq!(json["item"][0]["pubDate"], "2024-05-01T12:00:00+09:00");
        assert_eq!(json["item"][0]["category"][0], "fantasy");
    }

    #[test]
    fn test_item_optional_fields_omitted() {
        let item = FeedItem::new("t", "l");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("author").is_none());
        assert!(json.get("pubDate").is_none());
        assert_eq!(json["category"], serde_json::json!([]));
    }

    #[test]
    fn test_feed_roundtrip_keeps_offset() {
        let mut item = FeedItem::new("t", "l");
        item.pub_date = Some(DateTime::parse_from_rfc3339("2023-01-02T03:04:05+09:00").unwrap());
        let feed = Feed::new("f", "l").with_image("https://example.com/i.png").with_items(vec![item]);

        let text = serde_json::to_string(&feed).unwrap();
        let back: Feed = serde_json::from_str(&text).unwrap();
        assert_eq!(back, feed);
    }
}
