//! Shared application state wired from configuration.

use std::sync::Arc;

use marquee_storage::{DynKeyedStore, DynMovieSource};

use crate::cache::MovieCache;
use crate::config::AppConfig;
use crate::leaderboard::Leaderboard;
use crate::profiles::ProfileStore;

/// Handles to the three access-pattern services, shared across handlers.
/// Also keeps the raw keyed store around for readiness probes.
#[derive(Clone)]
pub struct AppState {
    pub store: DynKeyedStore,
    pub movies: Arc<MovieCache>,
    pub profiles: Arc<ProfileStore>,
    pub leaderboard: Arc<Leaderboard>,
}

impl AppState {
    /// Wire the services over a keyed store and an authoritative source.
    pub fn new(store: DynKeyedStore, source: DynMovieSource, cfg: &AppConfig) -> Self {
        Self {
            movies: Arc::new(MovieCache::new(
                store.clone(),
                source,
                cfg.movie_ttl(),
            )),
            profiles: Arc::new(ProfileStore::new(store.clone(), cfg.profile_ttl())),
            leaderboard: Arc::new(Leaderboard::new(store.clone(), cfg.cache.default_top_n)),
            store,
        }
    }
}
