//! # Feedgate Pixiv
//!
//! A Pixiv user's novels as a feed, with each novel's full text inlined.
//!
//! Requires an app API access token. The novel list is paginated; the text
//! of every listed novel is then fetched as one parallel batch that fails
//! as a whole if any single fetch fails.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod markup;
mod route;
mod types;

pub use client::{PixivClient, PixivConfig, MAX_LISTING_PAGES};
pub use markup::novel_text_to_html;
pub use types::{ImageUrls, NovelSeries, NovelTag, PixivNovel, PixivUser, UserNovels};
