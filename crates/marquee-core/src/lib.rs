//! Core domain types and error taxonomy for the Marquee server.
//!
//! This crate holds the types shared by every other Marquee crate: the
//! [`Movie`] record with its explicit cache encode/decode contract, the
//! profile and leaderboard view types returned to callers, and the
//! [`CoreError`] taxonomy that maps onto the HTTP boundary.

pub mod error;
pub mod leaderboard;
pub mod movie;
pub mod profile;

pub use error::{CoreError, Result};
pub use leaderboard::{LeaderboardRow, ScoreView, member_key, strip_member_prefix};
pub use movie::{CachedMovie, FetchSource, Movie, movie_cache_key};
pub use profile::{ProfileView, coerce_scalar, profile_key};
