//! Storage traits for the Marquee abstraction layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;
use marquee_core::Movie;

/// Abstraction over a network-accessible keyed store.
///
/// Covers exactly the three data shapes Marquee uses: string-with-expiry
/// (object cache), hash-with-expiry (profiles), and a sorted set with atomic
/// increment and descending rank/range queries (leaderboard). Every method
/// is a single store command (or one pipelined unit), so correctness of the
/// layers above relies only on per-command atomicity. Implementations must
/// be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use marquee_storage::{KeyedStore, StoreError};
///
/// async fn cached(store: &dyn KeyedStore, key: &str) -> Result<Option<String>, StoreError> {
///     store.get(key).await
/// }
/// ```
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Round-trips a trivial command to confirm the store is reachable.
    /// Readiness probes use this; data paths never do.
    async fn ping(&self) -> Result<(), StoreError>;

    // ==================== String shape ====================

    /// Reads a string value. Returns `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a string value with a time-to-live.
    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Deletes a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    // ==================== Hash shape ====================

    /// Merges fields into a hash and resets its time-to-live.
    ///
    /// Existing fields not named in `fields` keep their values; named fields
    /// are overwritten. The merge and the expiry reset are issued as one
    /// pipelined unit, though the store may land them a moment apart; the
    /// field data is correct either way, only the TTL can lag.
    async fn hash_merge(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Reads all fields of a hash. An absent or expired key yields an empty
    /// map, indistinguishable from a hash with zero fields.
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    // ==================== Sorted-set shape ====================

    /// Atomically increments a member's score by `delta` (possibly negative)
    /// and returns the new score. A missing member starts from zero.
    async fn sorted_incr(
        &self,
        key: &str,
        member: &str,
        delta: f64,
    ) -> Result<f64, StoreError>;

    /// Returns a member's zero-based position in descending score order, or
    /// `None` if the member is not in the set.
    async fn sorted_rev_rank(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError>;

    /// Returns `(member, score)` pairs for the inclusive position range
    /// `start..=stop` in descending score order.
    async fn sorted_rev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>, StoreError>;
}

/// The slow authoritative upstream behind the object cache.
///
/// Modeled strictly as a capability set so the simulated in-memory source
/// can be swapped for a real upstream without touching the cache logic.
/// No partial-failure modes beyond unavailable/timeout.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetches a movie by id. Returns `None` if the source has no such
    /// record. Callers must not cache that absence.
    async fn fetch(&self, id: &str) -> Result<Option<Movie>, StoreError>;

    /// Persists a movie, inserting or replacing, and returns the stored
    /// record.
    async fn persist(&self, movie: Movie) -> Result<Movie, StoreError>;
}

/// Type alias for a shareable KeyedStore instance.
pub type DynKeyedStore = Arc<dyn KeyedStore>;

/// Type alias for a shareable MovieSource instance.
pub type DynMovieSource = Arc<dyn MovieSource>;
