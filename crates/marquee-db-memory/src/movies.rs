//! Simulated slow authoritative movie source.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use marquee_core::Movie;
use marquee_storage::{MovieSource, StoreError};

/// In-memory movie table behind an artificial latency, standing in for a
/// slow upstream datastore.
///
/// The table is process-wide shared state guarded by an async RwLock, so
/// concurrent cache misses hitting `fetch` at once stay safe. Latencies are
/// plain sleeps; tests pass [`Duration::ZERO`] to skip them.
#[derive(Debug)]
pub struct InMemoryMovieSource {
    movies: RwLock<HashMap<String, Movie>>,
    fetch_delay: Duration,
    persist_delay: Duration,
}

impl InMemoryMovieSource {
    /// Default artificial fetch latency, matching the simulated upstream.
    pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(600);
    /// Default artificial persist latency.
    pub const DEFAULT_PERSIST_DELAY: Duration = Duration::from_millis(100);

    /// Creates a seeded source with the default latencies.
    pub fn new() -> Self {
        Self::with_latency(Self::DEFAULT_FETCH_DELAY, Self::DEFAULT_PERSIST_DELAY)
    }

    /// Creates a seeded source with explicit latencies.
    pub fn with_latency(fetch_delay: Duration, persist_delay: Duration) -> Self {
        let seed = [
            Movie::new("1", "Inception", 2010),
            Movie::new("2", "Interstellar", 2014),
        ];
        Self {
            movies: RwLock::new(seed.into_iter().map(|m| (m.id.clone(), m)).collect()),
            fetch_delay,
            persist_delay,
        }
    }

    /// Creates an unseeded, zero-latency source for tests.
    pub fn empty() -> Self {
        Self {
            movies: RwLock::new(HashMap::new()),
            fetch_delay: Duration::ZERO,
            persist_delay: Duration::ZERO,
        }
    }
}

impl Default for InMemoryMovieSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieSource for InMemoryMovieSource {
    async fn fetch(&self, id: &str) -> Result<Option<Movie>, StoreError> {
        tokio::time::sleep(self.fetch_delay).await;
        let movies = self.movies.read().await;
        Ok(movies.get(id).cloned())
    }

    async fn persist(&self, movie: Movie) -> Result<Movie, StoreError> {
        tokio::time::sleep(self.persist_delay).await;
        let mut movies = self.movies.write().await;
        movies.insert(movie.id.clone(), movie.clone());
        Ok(movie)
    }
}
