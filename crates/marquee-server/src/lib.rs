pub mod cache;
pub mod config;
pub mod handlers;
pub mod leaderboard;
pub mod observability;
pub mod profiles;
pub mod server;
pub mod state;
pub mod store;

pub use cache::MovieCache;
pub use config::{AppConfig, CacheConfig, LoggingConfig, RedisConfig, ServerConfig, SourceConfig};
pub use leaderboard::{LEADERBOARD_KEY, Leaderboard};
pub use observability::{apply_logging_level, init_tracing};
pub use profiles::ProfileStore;
pub use server::{MarqueeServer, ServerBuilder, build_app, build_router};
pub use state::AppState;
pub use store::{RedisKeyedStore, create_keyed_store};
