// src/lib.rs
//
// Validation and response-cache core for the store backend.
//
// Two independent pipelines live here:
// - user input validation (passwords, emails) returning ordered violation
//   lists for the API layer to surface as 400 payloads
// - response caching with a fixed key grammar and a prefix-exact
//   invalidation sweep driven by persistence hooks

pub mod caching;
pub mod common;
pub mod users;

pub use caching::{CacheKey, CacheStore, MemoryStore, Operation, ResponseCache};
pub use common::{CacheConfig, CacheError, ValidationResult};
pub use users::{EmailValidator, PasswordValidator, UserProfile};
