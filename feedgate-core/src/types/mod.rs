//! Domain types for Feedgate.
//!
//! - [`Feed`]: the payload every route returns
//! - [`FeedItem`]: one normalized entry of a feed

mod feed;

pub use feed::*;
