//! Memoizing cache-or-compute gate.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use feedgate_core::error::Result;
use feedgate_core::traits::CacheStore;

use crate::store::{CacheConfig, MemoryStore, NoopStore};

/// Shared gate every route fetches through.
///
/// Created once at service start and shared for the life of the process.
/// Concurrent misses on the same key are not collapsed: each caller runs
/// its own producer and the last write wins.
#[derive(Clone)]
pub struct CacheGate {
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
}

impl CacheGate {
    /// Creates a gate over any store.
    pub fn new(store: Arc<dyn CacheStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    /// Creates a gate over a fresh in-memory store.
    pub fn in_memory(config: CacheConfig) -> Self {
        let default_ttl = config.default_ttl();
        Self::new(Arc::new(MemoryStore::with_config(config)), default_ttl)
    }

    /// Creates a gate that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopStore), Duration::ZERO)
    }

    /// TTL used when a caller passes `None`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Returns the cached value for `key`, or runs `producer` and caches its result.
    ///
    /// A producer error is returned as-is and nothing is stored. Store
    /// failures never fail the call: a failed read counts as a miss and a
    /// failed write still returns the fresh value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let novels: Vec<Novel> = gate
    ///     .try_get(&url, || client.fetch(&url), None)
    ///     .await?;
    /// ```
    #[instrument(skip(self, producer))]
    pub async fn try_get<T, F, Fut>(&self, key: &str, producer: F, ttl: Option<Duration>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
            },
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache read failed, treating as miss"),
        }

        debug!(key, "Cache miss, running producer");
        let value = producer().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                let ttl = ttl.unwrap_or(self.default_ttl);
                if let Err(e) = self.store.set(key, raw, ttl).await {
                    warn!(key, error = %e, "Cache write failed");
                }
            }
            Err(e) => warn!(key, error = %e, "Value not cacheable"),
        }

        Ok(value)
    }
}

impl Default for CacheGate {
    fn default() -> Self {
        Self::in_memory(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use feedgate_core::error::FeedError;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Page {
        title: String,
        ids: Vec<u64>,
    }

    fn page(title: &str) -> Page {
        Page {
            title: title.into(),
            ids: vec![1, 2, 3],
        }
    }

    async fn counted(calls: &AtomicUsize, title: &str) -> Result<Page> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(page(title))
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_skips_producer() {
        let gate = CacheGate::default();
        let calls = AtomicUsize::new(0);

        let first = gate.try_get("k", || counted(&calls, "a"), None).await.unwrap();
        let second = gate.try_get("k", || counted(&calls, "b"), None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(second.title, "a");
    }

    #[tokio::test]
    async fn test_expired_entry_runs_producer_again() {
        let gate = CacheGate::default();
        let calls = AtomicUsize::new(0);
        let ttl = Some(Duration::from_millis(5));

        gate.try_get("k", || counted(&calls, "a"), ttl).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let refreshed = gate.try_get("k", || counted(&calls, "b"), ttl).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.title, "b");
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_bleed() {
        let gate = CacheGate::default();
        let calls = AtomicUsize::new(0);

        let a = gate.try_get("https://x/?word=a", || counted(&calls, "a"), None).await.unwrap();
        let b = gate.try_get("https://x/?word=b", || counted(&calls, "b"), None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(a.title, "a");
        assert_eq!(b.title, "b");
    }

    #[tokio::test]
    async fn test_producer_error_is_not_cached() {
        let gate = CacheGate::default();
        let calls = AtomicUsize::new(0);

        let err = gate
            .try_get::<Page, _, _>(
                "k",
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(FeedError::upstream("list", "HTTP 503"))
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(err.is_upstream_error());

        let value = gate.try_get("k", || counted(&calls, "ok"), None).await.unwrap();
        assert_eq!(value.title, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disabled_gate_always_runs_producer() {
        let gate = CacheGate::disabled();
        let calls = AtomicUsize::new(0);

        gate.try_get("k", || counted(&calls, "a"), None).await.unwrap();
        gate.try_get("k", || counted(&calls, "a"), None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        store.set_with_ttl("k", "not json".into(), Duration::from_secs(60));
        let gate = CacheGate::new(store.clone(), Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let value = gate.try_get("k", || counted(&calls, "fresh"), None).await.unwrap();

        assert_eq!(value.title, "fresh");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.get_value("k").unwrap().contains("fresh"));
    }

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(FeedError::Cache("connection refused".into()))
        }

        async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<()> {
            Err(FeedError::Cache("connection refused".into()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_failure_does_not_fail_fetch() {
        let gate = CacheGate::new(Arc::new(BrokenStore), Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let value = gate.try_get("k", || counted(&calls, "a"), None).await.unwrap();

        assert_eq!(value.title, "a");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_explicit_ttl_overrides_default() {
        let store = Arc::new(MemoryStore::new());
        let gate = CacheGate::new(store.clone(), Duration::from_millis(1));
        let calls = AtomicUsize::new(0);

        gate.try_get("k", || counted(&calls, "a"), Some(Duration::from_secs(60)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        gate.try_get("k", || counted(&calls, "b"), None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
