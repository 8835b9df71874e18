//! Tests for the caching module
//!
//! These tests cover:
//! - key rendering and grammar parsing (prefix-exact, never substring)
//! - the in-memory store contract (TTL, wildcard key listing)
//! - the paired response entries and the invalidation sweep

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;
    use std::sync::Arc;

    use crate::caching::key::{CacheKey, KeyGrammar, Operation};
    use crate::caching::response::ResponseCache;
    use crate::caching::store::{CacheStore, MemoryStore};
    use crate::caching::sweep::{purge_entity_cache, sweep_entity};
    use crate::common::{CacheConfig, CacheError};

    fn ttl() -> Duration {
        Duration::seconds(60)
    }

    async fn seed(store: &MemoryStore, keys: &[&str]) {
        for key in keys {
            store.set(key, json!("cached"), ttl()).await.unwrap();
        }
    }

    async fn live_keys(store: &MemoryStore) -> Vec<String> {
        let mut keys = store.keys("*").await.unwrap();
        keys.sort();
        keys
    }

    // ------------------------------------------------------------------
    // Key grammar
    // ------------------------------------------------------------------

    #[test]
    fn test_key_rendering() {
        let key = CacheKey::new("product", Operation::Retrieve).pk(5);
        assert_eq!(key.render(), "product_retrieve_5");
        assert_eq!(key.status_key(), "product_retrieve_5_status_code");

        let key = CacheKey::new("product_type", Operation::List)
            .admin(true)
            .page(2);
        assert_eq!(key.render(), "product_type_list_admin_page_2");
    }

    #[test]
    fn test_parse_simple_list_key() {
        let grammar = KeyGrammar::new();
        let parsed = grammar.parse("product_list").unwrap();
        assert_eq!(parsed.prefix, "product");
        assert_eq!(parsed.operation, Operation::List);
        assert!(!parsed.admin);
        assert_eq!(parsed.pk, None);
        assert!(!parsed.status_code);
    }

    #[test]
    fn test_parse_keeps_multi_segment_prefix_intact() {
        let grammar = KeyGrammar::new();
        let parsed = grammar.parse("product_type_list").unwrap();
        assert_eq!(parsed.prefix, "product_type");
        assert_eq!(parsed.operation, Operation::List);
    }

    #[test]
    fn test_parse_full_key() {
        let grammar = KeyGrammar::new();
        let parsed = grammar
            .parse("product_retrieve_admin_5_page_2_status_code")
            .unwrap();
        assert_eq!(parsed.prefix, "product");
        assert_eq!(parsed.operation, Operation::Retrieve);
        assert!(parsed.admin);
        assert_eq!(parsed.pk, Some(5));
        assert_eq!(parsed.page, Some(2));
        assert!(parsed.status_code);
    }

    #[test]
    fn test_parse_status_code_twin() {
        let grammar = KeyGrammar::new();
        let parsed = grammar.parse("product_retrieve_5_status_code").unwrap();
        assert_eq!(parsed.prefix, "product");
        assert_eq!(parsed.pk, Some(5));
        assert!(parsed.status_code);
    }

    #[test]
    fn test_parse_rejects_foreign_keys() {
        let grammar = KeyGrammar::new();
        assert!(grammar.parse("session:12345").is_none());
        assert!(grammar.parse("product").is_none());
        assert!(grammar.parse("product_destroy_5").is_none());
        assert!(grammar.parse("").is_none());
    }

    #[test]
    fn test_rendered_keys_parse_back() {
        let grammar = KeyGrammar::new();
        let key = CacheKey::new("price_currency", Operation::List).page(3);
        let parsed = grammar.parse(&key.render()).unwrap();
        assert_eq!(parsed.prefix, "price_currency");
        assert_eq!(parsed.page, Some(3));
    }

    // ------------------------------------------------------------------
    // Memory store
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_store_set_get_delete() {
        let store = MemoryStore::new();
        store.set("user_list", json!([1, 2]), ttl()).await.unwrap();

        assert_eq!(store.get("user_list").await.unwrap(), Some(json!([1, 2])));
        assert!(store.delete("user_list").await.unwrap());
        assert_eq!(store.get("user_list").await.unwrap(), None);
        assert!(!store.delete("user_list").await.unwrap());
    }

    #[tokio::test]
    async fn test_store_expired_entry_is_absent() {
        let store = MemoryStore::new();
        store
            .set("user_list", json!("stale"), Duration::zero())
            .await
            .unwrap();

        assert_eq!(store.get("user_list").await.unwrap(), None);
        assert!(live_keys(&store).await.is_empty());
        assert_eq!(store.purge_expired().await, 1);
    }

    #[tokio::test]
    async fn test_store_key_patterns() {
        let store = MemoryStore::new();
        seed(&store, &["product_list", "product_retrieve_5", "user_list"]).await;

        assert_eq!(live_keys(&store).await.len(), 3);

        let mut matched = store.keys("product*").await.unwrap();
        matched.sort();
        assert_eq!(matched, vec!["product_list", "product_retrieve_5"]);

        assert_eq!(store.keys("user_list").await.unwrap(), vec!["user_list"]);
        assert!(store.keys("missing*").await.unwrap().is_empty());
    }

    // ------------------------------------------------------------------
    // Response cache pairing
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_response_cache_round_trip() {
        let store = MemoryStore::new();
        let cache = ResponseCache::new(Arc::new(store.clone()), CacheConfig::default());

        cache
            .write("product_retrieve_5", json!({"id": 5}), 200)
            .await
            .unwrap();

        let cached = cache.read("product_retrieve_5").await.unwrap().unwrap();
        assert_eq!(cached.data, json!({"id": 5}));
        assert_eq!(cached.status_code, 200);
        assert_eq!(
            live_keys(&store).await,
            vec!["product_retrieve_5", "product_retrieve_5_status_code"]
        );
    }

    #[tokio::test]
    async fn test_missing_status_twin_is_a_miss() {
        let store = MemoryStore::new();
        let cache = ResponseCache::new(Arc::new(store.clone()), CacheConfig::default());

        store
            .set("product_list", json!([1]), ttl())
            .await
            .unwrap();

        assert!(cache.read("product_list").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_garbled_status_twin_is_a_miss() {
        let store = MemoryStore::new();
        let cache = ResponseCache::new(Arc::new(store.clone()), CacheConfig::default());

        store.set("product_list", json!([1]), ttl()).await.unwrap();
        store
            .set("product_list_status_code", json!("not a code"), ttl())
            .await
            .unwrap();

        assert!(cache.read("product_list").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_deletes_both_halves() {
        let store = MemoryStore::new();
        let cache = ResponseCache::new(Arc::new(store.clone()), CacheConfig::default());

        cache.write("user_list", json!([]), 200).await.unwrap();
        cache.remove("user_list").await.unwrap();

        assert!(live_keys(&store).await.is_empty());
    }

    // ------------------------------------------------------------------
    // Invalidation sweep
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_sweep_spares_superstring_prefixes() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                "product_list",
                "product_retrieve_5",
                "product_retrieve_5_status_code",
                "product_type_list",
            ],
        )
        .await;

        let removed = sweep_entity(&store, "product", Some(5)).await.unwrap();

        assert_eq!(removed, 3);
        assert_eq!(live_keys(&store).await, vec!["product_type_list"]);
    }

    #[tokio::test]
    async fn test_sweep_with_pk_spares_other_ids() {
        let store = MemoryStore::new();
        seed(
            &store,
            &["product_list", "product_retrieve_5", "product_retrieve_7"],
        )
        .await;

        sweep_entity(&store, "product", Some(5)).await.unwrap();

        // the collection key goes, the other id survives
        assert_eq!(live_keys(&store).await, vec!["product_retrieve_7"]);
    }

    #[tokio::test]
    async fn test_sweep_without_pk_removes_all_prefix_keys() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                "product_list",
                "product_retrieve_5",
                "product_retrieve_7",
                "user_list",
            ],
        )
        .await;

        sweep_entity(&store, "product", None).await.unwrap();

        assert_eq!(live_keys(&store).await, vec!["user_list"]);
    }

    #[tokio::test]
    async fn test_sweep_removes_admin_and_page_variants() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                "product_list_admin",
                "product_list_page_2",
                "product_retrieve_admin_5",
            ],
        )
        .await;

        sweep_entity(&store, "product", Some(5)).await.unwrap();

        assert!(live_keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_deletes_each_key_at_most_once() {
        let store = MemoryStore::new();
        seed(
            &store,
            &["review_retrieve_9", "review_retrieve_9_status_code"],
        )
        .await;

        // both the data key and its twin are enumerated; pairing must not
        // double-count either of them
        let removed = sweep_entity(&store, "review", Some(9)).await.unwrap();
        assert_eq!(removed, 2);
        assert!(live_keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_skips_foreign_keys() {
        let store = MemoryStore::new();
        seed(&store, &["product_list", "session:product", "productlist"]).await;

        sweep_entity(&store, "product", None).await.unwrap();

        assert_eq!(
            live_keys(&store).await,
            vec!["productlist", "session:product"]
        );
    }

    #[tokio::test]
    async fn test_sweep_rejects_invalid_prefix() {
        let store = MemoryStore::new();
        let result = sweep_entity(&store, "", None).await;
        assert!(matches!(result, Err(CacheError::InvalidPrefix(_))));

        let result = sweep_entity(&store, "product:*", None).await;
        assert!(matches!(result, Err(CacheError::InvalidPrefix(_))));
    }

    #[tokio::test]
    async fn test_purge_entity_cache_swallows_nothing_fatal() {
        let store = MemoryStore::new();
        seed(&store, &["image_list"]).await;

        purge_entity_cache(&store, "image", None).await;
        assert!(live_keys(&store).await.is_empty());

        // an invalid prefix is logged, not propagated
        purge_entity_cache(&store, "", None).await;
    }
}
