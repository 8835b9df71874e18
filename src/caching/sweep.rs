// src/caching/sweep.rs
//
// Invalidation sweep. After an entity write or delete, every cached
// response that could hold stale data for that entity is removed. Matching
// is on the parsed prefix, never on raw string containment: sweeping
// `product` must leave `product_type` keys alone.

use std::collections::HashSet;
use tracing::{debug, warn};

use super::key::{KeyGrammar, STATUS_CODE_SUFFIX};
use super::store::CacheStore;
use crate::common::CacheError;

/// Deletes every cached entry belonging to `prefix`.
///
/// With a `pk`, keys carrying a different id survive; collection keys
/// (no id segment) always go, since any write can change a listing.
/// Each key is deleted at most once and a data entry goes together with
/// its status-code twin. Returns the number of entries removed.
pub async fn sweep_entity(
    store: &dyn CacheStore,
    prefix: &str,
    pk: Option<u64>,
) -> Result<usize, CacheError> {
    if prefix.is_empty()
        || !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CacheError::InvalidPrefix(prefix.to_string()));
    }

    let grammar = KeyGrammar::new();
    let keys = store.keys("*").await?;
    let mut deleted: HashSet<String> = HashSet::new();
    let mut removed = 0;

    for key in keys {
        if deleted.contains(&key) {
            continue;
        }
        let Some(parsed) = grammar.parse(&key) else {
            debug!(%key, "key does not follow the cache key grammar, skipping");
            continue;
        };
        if parsed.prefix != prefix {
            continue;
        }
        if let (Some(target), Some(found)) = (pk, parsed.pk) {
            if found != target {
                continue;
            }
        }
        let data_key = key
            .strip_suffix(STATUS_CODE_SUFFIX)
            .unwrap_or(&key)
            .to_string();
        let twin = format!("{}{}", data_key, STATUS_CODE_SUFFIX);
        for candidate in [data_key, twin] {
            if deleted.insert(candidate.clone()) && store.delete(&candidate).await? {
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Hook-facing wrapper called from post-save/post-delete persistence
/// events. Cache cleanup is best effort: failures are logged, never
/// propagated to the write that triggered them. Stale entries are bounded
/// by their own TTL regardless.
pub async fn purge_entity_cache(store: &dyn CacheStore, prefix: &str, pk: Option<u64>) {
    match sweep_entity(store, prefix, pk).await {
        Ok(removed) => debug!(%prefix, ?pk, removed, "entity cache purged"),
        Err(error) => warn!(%prefix, ?pk, %error, "entity cache purge failed"),
    }
}
