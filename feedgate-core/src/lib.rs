//! # Feedgate Core
//!
//! Core types, errors, and traits shared by every Feedgate route.
//!
//! - **Types**: the normalized [`Feed`] and [`FeedItem`] shapes
//! - **Errors**: [`FeedError`] with configuration / parameter / upstream kinds
//! - **Constants**: upstream endpoints and cache defaults
//! - **Traits**: the [`CacheStore`] backend interface
//!
//! ## Example
//!
//! ```rust
//! use feedgate_core::{Feed, FeedItem};
//!
//! let feed = Feed::new("Example", "https://example.com")
//!     .with_items(vec![FeedItem::new("First", "https://example.com/1")]);
//! let json = serde_json::to_string(&feed).unwrap();
//! assert!(json.contains("\"item\""));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FeedError, Result};
pub use traits::*;
pub use types::*;
