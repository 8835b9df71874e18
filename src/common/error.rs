// Error types for the caching layer
//
// Validation failures are never errors: the validators return violation
// lists as data. Errors here cover the cache store only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid cache key prefix '{0}'")]
    InvalidPrefix(String),
}
