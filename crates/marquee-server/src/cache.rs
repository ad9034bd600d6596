//! Cache-aside object cache for movie records.
//!
//! Reads check the keyed store first and fall back to the slow authoritative
//! source on a miss, populating the cache afterward with a fixed TTL. Writes
//! go to the source and then invalidate the cache entry, never write
//! through, so a write racing a concurrent cache population cannot pin a
//! stale snapshot past its TTL.
//!
//! Two concurrent misses for the same id may both hit the source and both
//! populate; the writes carry identical data and the last one wins, so the
//! only cost is the redundant source call. No single-flight coalescing.

use std::time::Duration;

use marquee_core::{CachedMovie, CoreError, FetchSource, Movie, Result, movie_cache_key};
use marquee_storage::{DynKeyedStore, DynMovieSource, KeyedStore, MovieSource};

/// Cache-aside layer over the keyed store and the authoritative source.
pub struct MovieCache {
    store: DynKeyedStore,
    source: DynMovieSource,
    ttl: Duration,
}

impl MovieCache {
    pub fn new(store: DynKeyedStore, source: DynMovieSource, ttl: Duration) -> Self {
        Self { store, source, ttl }
    }

    /// Fetch a movie, reporting whether it came from the cache or the source.
    ///
    /// Absent records are reported as `NotFound` and never cached. An
    /// undecodable cached payload is treated as a miss and falls through to
    /// the source rather than failing the read.
    pub async fn get(&self, record_id: &str) -> Result<CachedMovie> {
        if record_id.trim().is_empty() {
            return Err(CoreError::invalid_argument("movie id must not be empty"));
        }

        let key = movie_cache_key(record_id);
        if let Some(raw) = self.store.get(&key).await? {
            match Movie::decode(&raw) {
                Ok(record) => {
                    tracing::debug!(key = %key, "cache hit");
                    return Ok(CachedMovie {
                        source: FetchSource::Cache,
                        record,
                    });
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "undecodable cache entry, treating as miss");
                }
            }
        }

        let Some(record) = self.source.fetch(record_id).await? else {
            return Err(CoreError::not_found("movie", record_id));
        };

        let encoded = record.encode()?;
        self.store.set_with_ttl(&key, &encoded, self.ttl).await?;
        tracing::debug!(key = %key, ttl_secs = %self.ttl.as_secs(), "cache populated from source");

        Ok(CachedMovie {
            source: FetchSource::Db,
            record,
        })
    }

    /// Persist a movie to the authoritative source, then invalidate its
    /// cache entry so the next read repopulates from source.
    pub async fn upsert(&self, movie: Movie) -> Result<Movie> {
        movie.validate()?;

        let stored = self.source.persist(movie).await?;
        self.store.delete(&movie_cache_key(&stored.id)).await?;
        tracing::debug!(id = %stored.id, "movie persisted, cache entry invalidated");

        Ok(stored)
    }
}
