//! Redis implementation of the `KeyedStore` trait over a deadpool pool.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, PoolError};
use redis::AsyncCommands;

use marquee_storage::{KeyedStore, StoreError};

/// Keyed store backed by Redis.
///
/// Every trait method is one Redis command, except `hash_merge` which
/// pipelines `HSET` + `EXPIRE` as a single unit. Pool wait/create/recycle
/// timeouts bound every call; a timed-out checkout surfaces as
/// `StoreError::Timeout` and is never retried here.
pub struct RedisKeyedStore {
    pool: Pool,
}

impl RedisKeyedStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<Connection, StoreError> {
        self.pool.get().await.map_err(|e| match e {
            PoolError::Timeout(kind) => {
                StoreError::timeout(format!("redis pool checkout timed out: {kind:?}"))
            }
            other => StoreError::connection(format!("failed to get redis connection: {other}")),
        })
    }

    fn command_err(err: redis::RedisError) -> StoreError {
        if err.is_timeout() {
            StoreError::timeout(err.to_string())
        } else if err.is_connection_refusal() || err.is_connection_dropped() {
            StoreError::connection(err.to_string())
        } else {
            StoreError::command(err.to_string())
        }
    }
}

#[async_trait]
impl KeyedStore for RedisKeyedStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(Self::command_err)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(Self::command_err)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .map_err(Self::command_err)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key).await.map_err(Self::command_err)
    }

    async fn hash_merge(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        // One pipelined unit; Redis may still land HSET before EXPIRE, which
        // only delays the TTL reset, never the field data.
        redis::pipe()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, ttl.as_secs().max(1) as i64)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(Self::command_err)
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.conn().await?;
        conn.hgetall::<_, HashMap<String, String>>(key)
            .await
            .map_err(Self::command_err)
    }

    async fn sorted_incr(
        &self,
        key: &str,
        member: &str,
        delta: f64,
    ) -> Result<f64, StoreError> {
        let mut conn = self.conn().await?;
        conn.zincr::<_, _, _, f64>(key, member, delta)
            .await
            .map_err(Self::command_err)
    }

    async fn sorted_rev_rank(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.conn().await?;
        redis::cmd("ZREVRANK")
            .arg(key)
            .arg(member)
            .query_async::<Option<u64>>(&mut conn)
            .await
            .map_err(Self::command_err)
    }

    async fn sorted_rev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>, StoreError> {
        let mut conn = self.conn().await?;
        conn.zrevrange_withscores::<_, Vec<(String, f64)>>(key, start, stop)
            .await
            .map_err(Self::command_err)
    }
}
