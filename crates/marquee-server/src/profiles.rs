//! Partially-updatable profile records over the hash shape.

use std::time::Duration;

use serde_json::{Map, Value};

use marquee_core::{CoreError, ProfileView, Result, coerce_scalar, profile_key};
use marquee_storage::{DynKeyedStore, KeyedStore};

/// Partial-field-update store for user profiles.
///
/// Updates merge supplied fields into the existing hash (fields absent from
/// an update keep their prior values) and reset the TTL every time
/// (sliding expiration). A hash with zero fields is indistinguishable from
/// an absent one, so both read as `NotFound`.
pub struct ProfileStore {
    store: DynKeyedStore,
    ttl: Duration,
}

impl ProfileStore {
    pub fn new(store: DynKeyedStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Merge fields into a profile, creating it if absent, and return the
    /// full merged record. Every supplied value is coerced to a string.
    pub async fn update(&self, user_id: &str, updates: &Map<String, Value>) -> Result<ProfileView> {
        if user_id.trim().is_empty() {
            return Err(CoreError::invalid_argument("user id must not be empty"));
        }
        if updates.is_empty() {
            return Err(CoreError::invalid_argument(
                "at least one profile field is required",
            ));
        }

        let coerced: Vec<(String, String)> = updates
            .iter()
            .map(|(name, value)| (name.clone(), coerce_scalar(value)))
            .collect();

        let key = profile_key(user_id);
        self.store.hash_merge(&key, &coerced, self.ttl).await?;
        tracing::debug!(key = %key, fields = coerced.len(), "profile merged, ttl reset");

        let merged = self.store.hash_get_all(&key).await?;
        Ok(ProfileView {
            key,
            fields: merged.into_iter().collect(),
        })
    }

    /// Read the full field mapping of a profile.
    pub async fn read(&self, user_id: &str) -> Result<ProfileView> {
        if user_id.trim().is_empty() {
            return Err(CoreError::invalid_argument("user id must not be empty"));
        }

        let key = profile_key(user_id);
        let fields = self.store.hash_get_all(&key).await?;
        if fields.is_empty() {
            return Err(CoreError::not_found("profile", user_id));
        }

        Ok(ProfileView {
            key,
            fields: fields.into_iter().collect(),
        })
    }
}
