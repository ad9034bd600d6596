//! In-memory backends for the Marquee storage traits.
//!
//! Two implementations live here:
//!
//! - [`MemoryKeyedStore`]: a TTL-aware in-process stand-in for the shared
//!   keyed store. Used by the test suites and as the graceful-degradation
//!   fallback when Redis is disabled or unreachable.
//! - [`InMemoryMovieSource`]: the simulated slow authoritative upstream: a
//!   seeded movie table behind a lock with configurable artificial latency.
//!
//! # Example
//!
//! ```ignore
//! use marquee_db_memory::{InMemoryMovieSource, MemoryKeyedStore};
//! use marquee_storage::MovieSource;
//!
//! let source = InMemoryMovieSource::new();
//! let movie = source.fetch("1").await?; // Inception, after the fetch delay
//! ```

pub mod keyed;
pub mod movies;

pub use keyed::MemoryKeyedStore;
pub use movies::InMemoryMovieSource;

// Re-export the traits for convenience
pub use marquee_storage::{KeyedStore, MovieSource, StoreError};
