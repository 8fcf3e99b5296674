//! Pixiv app API response records.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Image URLs at several sizes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// 360x360 crop
    #[serde(default)]
    pub square_medium: Option<String>,
    /// Medium size
    #[serde(default)]
    pub medium: Option<String>,
    /// Large size
    #[serde(default)]
    pub large: Option<String>,
}

/// Novel author.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixivUser {
    /// Numeric user ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Account handle
    #[serde(default)]
    pub account: String,
    /// Avatar
    #[serde(default)]
    pub profile_image_urls: ImageUrls,
}

/// Tag attached to a novel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NovelTag {
    /// Tag text
    pub name: String,
    /// English translation, when Pixiv has one
    #[serde(default)]
    pub translated_name: Option<String>,
}

/// Series a novel belongs to. Pixiv sends `{}` for standalone novels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelSeries {
    /// Series ID
    #[serde(default)]
    pub id: Option<u64>,
    /// Series title
    #[serde(default)]
    pub title: Option<String>,
}

/// A novel as listed on a user's page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixivNovel {
    /// Novel ID
    pub id: u64,
    /// Title
    pub title: String,
    /// Author caption (HTML)
    #[serde(default)]
    pub caption: String,
    /// 0 = all ages, 1 = R-18, 2 = R-18G
    #[serde(default)]
    pub x_restrict: u8,
    /// Cover images
    #[serde(default)]
    pub image_urls: ImageUrls,
    /// Publication time
    pub create_date: DateTime<FixedOffset>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<NovelTag>,
    /// Length in characters
    #[serde(default)]
    pub text_length: u64,
    /// Author
    pub user: PixivUser,
    /// Series, if any
    #[serde(default)]
    pub series: Option<NovelSeries>,
}

impl PixivNovel {
    /// Age-restriction label, if any.
    pub fn restriction_label(&self) -> Option<&'static str> {
        match self.x_restrict {
            1 => Some("R-18"),
            2 => Some("R-18G"),
            _ => None,
        }
    }
}

/// One page of `/v1/user/novels`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct UserNovelsPage {
    pub user: PixivUser,
    #[serde(default)]
    pub novels: Vec<PixivNovel>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// `/v1/novel/text` response.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NovelText {
    pub novel_text: String,
}

/// A user's novels across however many pages were needed.
#[derive(Clone, Debug, PartialEq)]
pub struct UserNovels {
    /// The author
    pub user: PixivUser,
    /// Novels, newest first
    pub novels: Vec<PixivNovel>,
}
