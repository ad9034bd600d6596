use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Simulated slow authoritative source
    #[serde(default)]
    pub source: SourceConfig,
    /// TTLs for the cache and profile shapes
    #[serde(default)]
    pub cache: CacheConfig,
    /// Redis configuration
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default derived via field defaults

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        // Cache validations
        if self.cache.movie_ttl_secs == 0 {
            return Err("cache.movie_ttl_secs must be > 0".into());
        }
        if self.cache.profile_ttl_secs == 0 {
            return Err("cache.profile_ttl_secs must be > 0".into());
        }
        // Leaderboard validations
        if self.cache.default_top_n == 0 {
            return Err("cache.default_top_n must be > 0".into());
        }
        // Redis validations
        if self.redis.enabled && self.redis.url.is_empty() {
            return Err("redis.enabled=true requires redis.url".into());
        }
        if self.redis.pool_size == 0 {
            return Err("redis.pool_size must be > 0".into());
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }

    pub fn movie_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.movie_ttl_secs)
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.profile_ttl_secs)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.source.fetch_delay_ms)
    }

    pub fn persist_delay(&self) -> Duration {
        Duration::from_millis(self.source.persist_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Artificial latencies for the simulated authoritative source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Fetch latency in milliseconds (DB_DELAY_MS in the upstream simulation)
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Persist latency in milliseconds
    #[serde(default = "default_persist_delay_ms")]
    pub persist_delay_ms: u64,
}

fn default_fetch_delay_ms() -> u64 {
    600
}

fn default_persist_delay_ms() -> u64 {
    100
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            persist_delay_ms: default_persist_delay_ms(),
        }
    }
}

/// TTL configuration for the keyed-store shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Movie cache entry TTL in seconds
    #[serde(default = "default_movie_ttl_secs")]
    pub movie_ttl_secs: u64,

    /// Profile hash TTL in seconds (sliding: reset on every update)
    #[serde(default = "default_profile_ttl_secs")]
    pub profile_ttl_secs: u64,

    /// Leaderboard page size when the caller's n is missing or invalid
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_movie_ttl_secs() -> u64 {
    60
}

fn default_profile_ttl_secs() -> u64 {
    600
}

fn default_top_n() -> usize {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            movie_ttl_secs: default_movie_ttl_secs(),
            profile_ttl_secs: default_profile_ttl_secs(),
            default_top_n: default_top_n(),
        }
    }
}

/// Redis configuration for the shared keyed store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Enable Redis (gracefully degrades to the in-memory store without it)
    /// Default: false (disabled for single-instance development)
    #[serde(default = "default_redis_enabled")]
    pub enabled: bool,

    /// Redis connection URL (e.g., "redis://localhost:6379")
    #[serde(default = "default_redis_url")]
    pub url: String,

    /// Connection pool size
    #[serde(default = "default_redis_pool_size")]
    pub pool_size: usize,

    /// Connection timeout in milliseconds
    #[serde(default = "default_redis_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_redis_enabled() -> bool {
    false
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_redis_pool_size() -> usize {
    10
}

fn default_redis_timeout_ms() -> u64 {
    5000
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: default_redis_enabled(),
            url: default_redis_url(),
            pool_size: default_redis_pool_size(),
            timeout_ms: default_redis_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                // Try default root-level file
                let default_path = PathBuf::from("marquee.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., MARQUEE__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("MARQUEE")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        // Validate
        merged.validate()?;
        Ok(merged)
    }
}
