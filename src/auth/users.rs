use std::collections::HashMap;

use actix_web::web;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, StoreError};
use crate::store::Store;
use super::hasher;

/// Per-user record, stored as a hash at `user:<lowercased-email>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl UserRecord {
    pub(crate) fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("email", self.email.clone()),
            ("username", self.username.clone()),
            ("password_hash", self.password_hash.clone()),
        ]
    }

    /// Rebuild a record from the raw hash fields. An empty map means
    /// the key does not exist; a partial map is a corrupt record and
    /// surfaces as a store error, not as "absent".
    pub(crate) fn from_map(mut map: HashMap<String, String>) -> Result<Option<Self>, AppError> {
        if map.is_empty() {
            return Ok(None);
        }
        let mut take = |field: &'static str| {
            map.remove(field)
                .ok_or(AppError::StoreError(StoreError::MalformedRecord(field)))
        };
        Ok(Some(Self {
            email: take("email")?,
            username: take("username")?,
            password_hash: take("password_hash")?,
        }))
    }
}

/// Store key for a user; lowercased so lookups are case-insensitive.
pub fn user_key(email: &str) -> String {
    format!("user:{}", email.to_lowercase())
}

#[derive(Clone)]
pub struct UserStore {
    store: Store,
}

impl UserStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Look up a user by normalized email. Absent is `None`, not an error.
    pub async fn get_user(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let mut conn = self.store.connection().await?;
        let map: HashMap<String, String> = conn.hgetall(user_key(email)).await?;
        UserRecord::from_map(map)
    }

    /// Hash the password and write the full record.
    ///
    /// Overwrites whatever is at the key; uniqueness is the endpoint's
    /// pre-check. Hashing runs on the blocking pool so it does not
    /// stall the async workers.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let plaintext = password.to_string();
        let password_hash = web::block(move || hasher::hash(&plaintext)).await??;

        let record = UserRecord {
            email: email.to_lowercase(),
            username: username.to_string(),
            password_hash,
        };

        let mut conn = self.store.connection().await?;
        let _: () = conn.hset_multiple(user_key(email), &record.to_pairs()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_key_normalizes_email() {
        assert_eq!(user_key("A@B.com"), "user:a@b.com");
        assert_eq!(user_key("a@b.com"), "user:a@b.com");
    }

    #[test]
    fn test_record_roundtrip() {
        let record = UserRecord {
            email: "a@b.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$04$abc".to_string(),
        };
        let map: HashMap<String, String> = record
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let restored = UserRecord::from_map(map).unwrap().unwrap();
        assert_eq!(restored.email, "a@b.com");
        assert_eq!(restored.username, "alice");
        assert_eq!(restored.password_hash, "$2b$04$abc");
    }

    #[test]
    fn test_empty_map_is_absent() {
        assert!(UserRecord::from_map(HashMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_partial_map_is_an_error() {
        let mut map = HashMap::new();
        map.insert("email".to_string(), "a@b.com".to_string());
        let result = UserRecord::from_map(map);
        assert!(matches!(
            result,
            Err(AppError::StoreError(StoreError::MalformedRecord(_)))
        ));
    }
}
