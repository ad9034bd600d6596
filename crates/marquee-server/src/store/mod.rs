//! Keyed-store backends for the server.
//!
//! The real deployment talks to Redis through a deadpool pool; when Redis is
//! disabled or unreachable the server degrades gracefully to the in-memory
//! store so it can still start and serve (single-instance semantics only).

pub mod redis;

use std::sync::Arc;

use marquee_db_memory::MemoryKeyedStore;
use marquee_storage::DynKeyedStore;

use crate::config::RedisConfig;
pub use self::redis::RedisKeyedStore;

/// Create a keyed store based on configuration.
///
/// - **Redis disabled**: returns the in-memory store.
/// - **Redis enabled**: builds a pool and verifies a connection, falling
///   back to the in-memory store if either step fails.
pub async fn create_keyed_store(config: &RedisConfig) -> DynKeyedStore {
    use std::time::Duration;

    if !config.enabled {
        tracing::info!("Redis disabled, using in-memory keyed store");
        return Arc::new(MemoryKeyedStore::new());
    }

    tracing::info!(url = %config.url, "Connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    if let Some(ref mut pool_config) = redis_config.pool {
        pool_config.max_size = config.pool_size;
        pool_config.timeouts.wait = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.create = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.recycle = Some(Duration::from_millis(config.timeout_ms));
    }

    let pool = match redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1)) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to create Redis pool. Falling back to in-memory keyed store."
            );
            return Arc::new(MemoryKeyedStore::new());
        }
    };

    // Test connection
    match pool.get().await {
        Ok(_) => {
            tracing::info!("Connected to Redis");
            Arc::new(RedisKeyedStore::new(pool))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Redis unreachable. Falling back to in-memory keyed store."
            );
            Arc::new(MemoryKeyedStore::new())
        }
    }
}
