//! Storage abstraction layer for the Marquee server.
//!
//! Two seams live here. [`KeyedStore`] abstracts the shared ephemeral keyed
//! store over the three data shapes Marquee uses (string with TTL, hash with
//! TTL, sorted set). [`MovieSource`] abstracts the slow authoritative
//! upstream the object cache falls back to on a miss. Both are trait
//! objects so backends can be swapped without touching the access-pattern
//! logic built on top of them.

pub mod error;
pub mod traits;

pub use error::StoreError;
pub use traits::{DynKeyedStore, DynMovieSource, KeyedStore, MovieSource};
