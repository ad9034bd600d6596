//! Partial-update semantics of the profile store.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value, json};

use marquee_core::CoreError;
use marquee_db_memory::MemoryKeyedStore;
use marquee_server::ProfileStore;
use marquee_storage::DynKeyedStore;

fn profiles_with_ttl(ttl: Duration) -> ProfileStore {
    let store: DynKeyedStore = Arc::new(MemoryKeyedStore::new());
    ProfileStore::new(store, ttl)
}

fn profiles() -> ProfileStore {
    profiles_with_ttl(Duration::from_secs(600))
}

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn update_coerces_scalars_and_merges_fields() {
    let profiles = profiles();

    let view = profiles
        .update("u1", &fields(json!({"level": 5, "active": true})))
        .await
        .unwrap();
    assert_eq!(view.key, "user:u1");
    assert_eq!(view.fields.get("level").map(String::as_str), Some("5"));
    assert_eq!(view.fields.get("active").map(String::as_str), Some("true"));

    // A later partial update overwrites only the named field.
    let view = profiles
        .update("u1", &fields(json!({"level": 6})))
        .await
        .unwrap();
    assert_eq!(view.fields.get("level").map(String::as_str), Some("6"));
    assert_eq!(view.fields.get("active").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn final_mapping_is_last_write_per_field() {
    let profiles = profiles();

    profiles
        .update("u2", &fields(json!({"a": 1, "b": "x"})))
        .await
        .unwrap();
    profiles
        .update("u2", &fields(json!({"b": "y", "c": false})))
        .await
        .unwrap();
    profiles
        .update("u2", &fields(json!({"a": 3.5})))
        .await
        .unwrap();

    let view = profiles.read("u2").await.unwrap();
    assert_eq!(view.fields.len(), 3);
    assert_eq!(view.fields.get("a").map(String::as_str), Some("3.5"));
    assert_eq!(view.fields.get("b").map(String::as_str), Some("y"));
    assert_eq!(view.fields.get("c").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn read_of_unknown_profile_is_not_found() {
    let profiles = profiles();
    assert!(matches!(
        profiles.read("nobody").await.unwrap_err(),
        CoreError::NotFound { .. }
    ));
}

#[tokio::test]
async fn profile_expires_after_ttl() {
    let profiles = profiles_with_ttl(Duration::from_millis(50));

    profiles
        .update("u3", &fields(json!({"level": 1})))
        .await
        .unwrap();
    assert!(profiles.read("u3").await.is_ok());

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(matches!(
        profiles.read("u3").await.unwrap_err(),
        CoreError::NotFound { .. }
    ));
}

#[tokio::test]
async fn every_update_slides_the_expiry() {
    let profiles = profiles_with_ttl(Duration::from_millis(80));

    profiles
        .update("u4", &fields(json!({"level": 1})))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Refreshing within the window pushes the deadline out again.
    profiles
        .update("u4", &fields(json!({"streak": 2})))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let view = profiles.read("u4").await.unwrap();
    assert_eq!(view.fields.len(), 2);
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let profiles = profiles();
    let err = profiles.update("u5", &Map::new()).await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
}

#[tokio::test]
async fn blank_user_id_is_rejected() {
    let profiles = profiles();
    assert!(matches!(
        profiles
            .update("", &fields(json!({"a": 1})))
            .await
            .unwrap_err(),
        CoreError::InvalidArgument(_)
    ));
    assert!(matches!(
        profiles.read("  ").await.unwrap_err(),
        CoreError::InvalidArgument(_)
    ));
}
