// src/caching/mod.rs
//
// Response caching for the store API. Cached list/retrieve responses are
// stored under a fixed key grammar together with a status-code twin entry;
// persistence hooks call the sweep after entity writes to purge stale keys.

pub mod key;
pub mod response;
pub mod store;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use key::{CacheKey, KeyGrammar, Operation, ParsedKey};
pub use response::{CachedResponse, ResponseCache};
pub use store::{CacheStore, MemoryStore};
pub use sweep::{purge_entity_cache, sweep_entity};
