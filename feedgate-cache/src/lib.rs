//! Cache-or-compute gate for Feedgate routes.
//!
//! [`CacheGate::try_get`] returns a stored value for a key while it is
//! fresh and otherwise runs the producer and stores its result. Storage is
//! behind [`feedgate_core::CacheStore`]; [`MemoryStore`] is the in-process
//! backend.

mod gate;
mod store;

pub use gate::CacheGate;
pub use store::{CacheConfig, CacheStats, MemoryStore, NoopStore};
