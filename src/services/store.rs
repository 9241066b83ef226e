use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::UserProfile;
use crate::services::{AppwriteError, PostgresError};

/// Errors raised by a profile store
///
/// These belong to the storage collaborator. Handlers surface them as-is;
/// the scoring core never sees them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Appwrite error: {0}")]
    Appwrite(#[from] AppwriteError),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] PostgresError),

    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid roster data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

/// Read-only view of the profile collection consumed by the matching core
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Current full roster, without duplicate ids
    async fn fetch_all_users(&self) -> Result<Vec<UserProfile>, StoreError>;

    /// Profile of the given identity, `None` when no profile exists yet
    async fn fetch_viewer_profile(&self, identity: &str) -> Result<Option<UserProfile>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Drop repeated ids, keeping the first occurrence and the roster order
pub fn dedupe_by_id(users: Vec<UserProfile>) -> Vec<UserProfile> {
    let mut seen = HashSet::with_capacity(users.len());
    let before = users.len();

    let unique: Vec<UserProfile> = users
        .into_iter()
        .filter(|u| seen.insert(u.id.clone()))
        .collect();

    if unique.len() != before {
        tracing::warn!("Dropped {} duplicate profile ids from roster", before - unique.len());
    }
    unique
}

/// Fixed in-memory roster, loaded from a JSON array of profiles
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<UserProfile>,
}

impl MemoryStore {
    pub fn new(users: Vec<UserProfile>) -> Self {
        Self {
            users: dedupe_by_id(users),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let users: Vec<UserProfile> = serde_json::from_str(&raw)?;
        tracing::info!("Loaded {} profiles from {}", users.len(), path.as_ref().display());
        Ok(Self::new(users))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_all_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.users.clone())
    }

    async fn fetch_viewer_profile(&self, identity: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == identity).cloned())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first() {
        let mut second = UserProfile::new("a");
        second.display_name = "second".to_string();
        let users = vec![UserProfile::new("a"), UserProfile::new("b"), second];

        let unique = dedupe_by_id(users);
        let ids: Vec<&str> = unique.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(unique[0].display_name, "");
    }

    #[tokio::test]
    async fn test_memory_store_lookup() {
        let store = MemoryStore::new(vec![UserProfile::new("a")]);

        assert!(store.fetch_viewer_profile("a").await.unwrap().is_some());
        assert!(store.fetch_viewer_profile("missing").await.unwrap().is_none());
        assert_eq!(store.fetch_all_users().await.unwrap().len(), 1);
    }
}
