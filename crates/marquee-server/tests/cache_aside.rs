//! Cache-aside behavior of the movie object cache, driven over the
//! zero-latency in-memory backends.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{CoreError, FetchSource, Movie};
use marquee_db_memory::{InMemoryMovieSource, MemoryKeyedStore};
use marquee_server::MovieCache;
use marquee_storage::{DynKeyedStore, KeyedStore};

fn cache_with_ttl(ttl: Duration) -> (MovieCache, DynKeyedStore) {
    let store: DynKeyedStore = Arc::new(MemoryKeyedStore::new());
    let source = Arc::new(InMemoryMovieSource::with_latency(
        Duration::ZERO,
        Duration::ZERO,
    ));
    (MovieCache::new(store.clone(), source, ttl), store)
}

fn cache() -> (MovieCache, DynKeyedStore) {
    cache_with_ttl(Duration::from_secs(60))
}

#[tokio::test]
async fn miss_then_hit_returns_identical_record() {
    let (cache, _) = cache();

    let first = cache.get("1").await.unwrap();
    assert_eq!(first.source, FetchSource::Db);
    assert_eq!(first.record, Movie::new("1", "Inception", 2010));

    let second = cache.get("1").await.unwrap();
    assert_eq!(second.source, FetchSource::Cache);
    assert_eq!(second.record, first.record);
}

#[tokio::test]
async fn absent_record_is_not_found_and_never_cached() {
    let (cache, store) = cache();

    let err = cache.get("999").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    // Negative results must not leave a cache entry behind.
    assert!(store.get("movie:999").await.unwrap().is_none());

    // A later miss still consults the source.
    let err = cache.get("999").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn upsert_invalidates_the_cache_entry() {
    let (cache, store) = cache();

    // Populate the cache.
    let before = cache.get("1").await.unwrap();
    assert_eq!(before.source, FetchSource::Db);
    assert!(store.get("movie:1").await.unwrap().is_some());

    cache
        .upsert(Movie::new("1", "Inception (Remastered)", 2010))
        .await
        .unwrap();
    assert!(store.get("movie:1").await.unwrap().is_none());

    // Next read repopulates from source and sees the new data.
    let after = cache.get("1").await.unwrap();
    assert_eq!(after.source, FetchSource::Db);
    assert_eq!(after.record.title, "Inception (Remastered)");
}

#[tokio::test]
async fn upsert_of_new_record_is_fetchable() {
    let (cache, _) = cache();

    let stored = cache.upsert(Movie::new("3", "Tenet", 2020)).await.unwrap();
    assert_eq!(stored, Movie::new("3", "Tenet", 2020));

    let fetched = cache.get("3").await.unwrap();
    assert_eq!(fetched.source, FetchSource::Db);
    assert_eq!(fetched.record, stored);
}

#[tokio::test]
async fn empty_id_is_rejected_before_the_store() {
    let (cache, _) = cache();

    assert!(matches!(
        cache.get("").await.unwrap_err(),
        CoreError::InvalidArgument(_)
    ));
    assert!(matches!(
        cache.get("   ").await.unwrap_err(),
        CoreError::InvalidArgument(_)
    ));
    assert!(matches!(
        cache.upsert(Movie::new("", "Nameless", 2024)).await.unwrap_err(),
        CoreError::InvalidArgument(_)
    ));
}

#[tokio::test]
async fn corrupt_cache_entry_is_treated_as_a_miss() {
    let (cache, store) = cache();

    store
        .set_with_ttl("movie:1", "{not valid json", Duration::from_secs(60))
        .await
        .unwrap();

    // The read recovers by falling through to the source.
    let fetched = cache.get("1").await.unwrap();
    assert_eq!(fetched.source, FetchSource::Db);
    assert_eq!(fetched.record.title, "Inception");

    // And the corrupt payload was overwritten with a decodable one.
    let raw = store.get("movie:1").await.unwrap().unwrap();
    assert_eq!(Movie::decode(&raw).unwrap(), fetched.record);
}

#[tokio::test]
async fn expired_entry_goes_back_to_the_source() {
    let (cache, _) = cache_with_ttl(Duration::from_millis(50));

    assert_eq!(cache.get("1").await.unwrap().source, FetchSource::Db);
    assert_eq!(cache.get("1").await.unwrap().source, FetchSource::Cache);

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(cache.get("1").await.unwrap().source, FetchSource::Db);
}
