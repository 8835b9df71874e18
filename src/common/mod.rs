// Common module - shared types used across the validation and caching layers

pub mod config;
pub mod error;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::CacheConfig;
pub use error::CacheError;
pub use validation::{Rule, ValidationResult};
