//! TTL-aware in-memory implementation of the `KeyedStore` trait.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use marquee_storage::{KeyedStore, StoreError};

/// A stored string value with its expiry deadline.
#[derive(Debug, Clone)]
struct StringEntry {
    value: String,
    expires_at: Instant,
}

impl StringEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// A stored hash with its expiry deadline.
#[derive(Debug, Clone)]
struct HashEntry {
    fields: HashMap<String, String>,
    expires_at: Instant,
}

impl HashEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct Shapes {
    strings: HashMap<String, StringEntry>,
    hashes: HashMap<String, HashEntry>,
    sorted: HashMap<String, HashMap<String, f64>>,
}

/// In-memory keyed store with lazy TTL expiry.
///
/// Expired entries are treated as absent on read and dropped on the next
/// write to the same key; there is no background sweeper. Sorted sets carry
/// no TTL, matching how the leaderboard uses the real store. Tie order in
/// rank queries is members ascending, implementation-defined like the
/// real store's native tie-break.
#[derive(Debug, Default)]
pub struct MemoryKeyedStore {
    shapes: RwLock<Shapes>,
}

impl MemoryKeyedStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of a sorted set ordered by descending score, ties by member.
    fn descending(members: &HashMap<String, f64>) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = members
            .iter()
            .map(|(m, s)| (m.clone(), *s))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}

#[async_trait]
impl KeyedStore for MemoryKeyedStore {
    async fn ping(&self) -> Result<(), StoreError> {
        // Process-local, always reachable.
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let shapes = self.shapes.read().await;
        Ok(shapes
            .strings
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut shapes = self.shapes.write().await;
        shapes.strings.insert(
            key.to_string(),
            StringEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut shapes = self.shapes.write().await;
        shapes.strings.remove(key);
        Ok(())
    }

    async fn hash_merge(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut shapes = self.shapes.write().await;
        let expires_at = Instant::now() + ttl;
        match shapes.hashes.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                for (name, value) in fields {
                    entry.fields.insert(name.clone(), value.clone());
                }
                // Sliding expiration: every merge resets the full TTL.
                entry.expires_at = expires_at;
            }
            _ => {
                let entry = HashEntry {
                    fields: fields.iter().cloned().collect(),
                    expires_at,
                };
                shapes.hashes.insert(key.to_string(), entry);
            }
        }
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let shapes = self.shapes.read().await;
        Ok(shapes
            .hashes
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.fields.clone())
            .unwrap_or_default())
    }

    async fn sorted_incr(
        &self,
        key: &str,
        member: &str,
        delta: f64,
    ) -> Result<f64, StoreError> {
        let mut shapes = self.shapes.write().await;
        let members = shapes.sorted.entry(key.to_string()).or_default();
        let score = members.entry(member.to_string()).or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    async fn sorted_rev_rank(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError> {
        let shapes = self.shapes.read().await;
        let Some(members) = shapes.sorted.get(key) else {
            return Ok(None);
        };
        Ok(Self::descending(members)
            .iter()
            .position(|(m, _)| m == member)
            .map(|pos| pos as u64))
    }

    async fn sorted_rev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>, StoreError> {
        let shapes = self.shapes.read().await;
        let Some(members) = shapes.sorted.get(key) else {
            return Ok(Vec::new());
        };
        let rows = Self::descending(members);
        let len = rows.len() as isize;
        // Inclusive range with negative-index semantics, like ZREVRANGE.
        let resolve = |i: isize| if i < 0 { len + i } else { i };
        let start = resolve(start).max(0);
        let stop = resolve(stop).min(len - 1);
        if start > stop || len == 0 {
            return Ok(Vec::new());
        }
        Ok(rows[start as usize..=stop as usize].to_vec())
    }
}
