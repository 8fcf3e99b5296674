//! # Feedgate Syosetu
//!
//! Keyword search over the Shōsetsuka ni Narō novel API family, served as
//! a feed. Covers the general site and its three adult sub-sites.
//!
//! ```rust,ignore
//! use feedgate_syosetu::{SyosetuClient, SyosetuConfig};
//!
//! let client = SyosetuClient::with_config(SyosetuConfig::default())?;
//! let feed = client.search_feed(&gate, "yomou", "word=dragon&order=new", None).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod genre;
mod options;
mod render;
mod route;
mod site;

pub use client::{Novel, SearchResult, SyosetuClient, SyosetuConfig};
pub use genre::{genre_name, nocgenre_name};
pub use options::{NovelType, SearchOptions, SearchOrder};
pub use route::feed_title;
pub use site::SearchSite;
