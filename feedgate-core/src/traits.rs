//! Common traits for Feedgate.
//!
//! These traits define the seams where storage backends plug in.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key-value backend behind the cache gate.
///
/// Values are opaque serialized text. Keys are compared verbatim: two keys
/// that differ in any byte are different entries.
///
/// Implementations might use:
/// - In-memory storage (single-process deployments, tests)
/// - An external key-value server shared by several processes
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value for `key` if present and unexpired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Removes the entry for `key`, if any.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Removes every entry.
    async fn clear(&self) -> Result<()>;
}
