use std::collections::HashMap;

use chrono::Utc;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, StoreError};
use crate::store::Store;

/// Per-session record, stored as a hash at `session:<sid>` with a
/// store-enforced TTL. The store purges the key on expiry; the
/// application never has to sweep sessions itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,
    pub username: String,
    pub login_at: i64,
}

impl SessionRecord {
    pub(crate) fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("email", self.email.clone()),
            ("username", self.username.clone()),
            ("login_at", self.login_at.to_string()),
        ]
    }

    pub(crate) fn from_map(mut map: HashMap<String, String>) -> Result<Option<Self>, AppError> {
        if map.is_empty() {
            return Ok(None);
        }
        let mut take = |field: &'static str| {
            map.remove(field)
                .ok_or(AppError::StoreError(StoreError::MalformedRecord(field)))
        };
        let email = take("email")?;
        let username = take("username")?;
        let login_at = take("login_at")?
            .parse::<i64>()
            .map_err(|_| AppError::StoreError(StoreError::MalformedRecord("login_at")))?;
        Ok(Some(Self {
            email,
            username,
            login_at,
        }))
    }
}

pub fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// Generate an unguessable session id: 128 random bits, hex-encoded.
fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Clone)]
pub struct SessionStore {
    store: Store,
    ttl_seconds: u64,
}

impl SessionStore {
    pub fn new(store: Store, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// Create a session for a logged-in user and return its id.
    pub async fn create(&self, email: &str, username: &str) -> Result<String, AppError> {
        let session_id = new_session_id();
        let record = SessionRecord {
            email: email.to_lowercase(),
            username: username.to_string(),
            login_at: Utc::now().timestamp(),
        };

        let key = session_key(&session_id);
        let mut conn = self.store.connection().await?;
        let _: () = conn.hset_multiple(&key, &record.to_pairs()).await?;
        let _: () = conn.expire(&key, self.ttl_seconds as i64).await?;
        Ok(session_id)
    }

    /// Read a session. Empty, missing and expired ids all come back as
    /// `None`; reads never refresh the TTL.
    pub async fn read(&self, session_id: &str) -> Result<Option<SessionRecord>, AppError> {
        if session_id.is_empty() {
            return Ok(None);
        }
        let mut conn = self.store.connection().await?;
        let map: HashMap<String, String> = conn.hgetall(session_key(session_id)).await?;
        SessionRecord::from_map(map)
    }

    /// Delete a session; deleting an already-absent session is fine.
    pub async fn delete(&self, session_id: &str) -> Result<(), AppError> {
        let mut conn = self.store.connection().await?;
        let _: () = conn.del(session_key(session_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique_hex() {
        let a = new_session_id();
        let b = new_session_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_key_format() {
        assert_eq!(session_key("deadbeef"), "session:deadbeef");
    }

    #[test]
    fn test_record_roundtrip() {
        let record = SessionRecord {
            email: "a@b.com".to_string(),
            username: "alice".to_string(),
            login_at: 1_700_000_000,
        };
        let map: HashMap<String, String> = record
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let restored = SessionRecord::from_map(map).unwrap().unwrap();
        assert_eq!(restored.email, "a@b.com");
        assert_eq!(restored.username, "alice");
        assert_eq!(restored.login_at, 1_700_000_000);
    }

    #[test]
    fn test_empty_map_is_absent() {
        assert!(SessionRecord::from_map(HashMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_bad_login_at_is_an_error() {
        let mut map = HashMap::new();
        map.insert("email".to_string(), "a@b.com".to_string());
        map.insert("username".to_string(), "alice".to_string());
        map.insert("login_at".to_string(), "yesterday".to_string());
        let result = SessionRecord::from_map(map);
        assert!(matches!(
            result,
            Err(AppError::StoreError(StoreError::MalformedRecord("login_at")))
        ));
    }
}
