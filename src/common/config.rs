// Environment-driven configuration for the caching layer

use chrono::Duration;
use std::env;
use tracing::warn;

/// Default lifetime of a cached response, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a cached response (and its status-code twin) stays valid.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// Reads `CACHE_TTL_SECONDS` from the environment, falling back to the
    /// default on absence or an unparseable value.
    pub fn from_env() -> Self {
        match env::var("CACHE_TTL_SECONDS") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(secs) if secs > 0 => Self {
                    ttl: Duration::seconds(secs),
                },
                _ => {
                    warn!(value = %raw, "invalid CACHE_TTL_SECONDS, using default");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
