//! Movie record type and the cache-boundary encode/decode contract.
//!
//! Cached payloads are the JSON form of [`Movie`]: a fixed schema
//! (`{id, title, year}`) rather than free-form JSON, so schema drift in a
//! cached value fails decoding predictably instead of surfacing later as a
//! malformed response.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A movie record. The authoritative source owns the canonical copy; the
/// object cache holds only a time-bounded serialized snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year,
        }
    }

    /// Validate caller-supplied record fields before any store access.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::invalid_argument("movie id must not be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::invalid_argument("movie title must not be empty"));
        }
        Ok(())
    }

    /// Encode for cache storage.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a cached payload. Callers at the cache boundary treat a
    /// decode failure as a cache miss, not a fatal error.
    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Where a fetched movie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    Cache,
    Db,
}

impl std::fmt::Display for FetchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Db => write!(f, "db"),
        }
    }
}

/// A fetch result tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedMovie {
    pub source: FetchSource,
    pub record: Movie,
}

/// Cache key for a movie record.
pub fn movie_cache_key(id: &str) -> String {
    format!("movie:{id}")
}
