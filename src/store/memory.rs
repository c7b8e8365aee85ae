//! Process-local record store

use super::traits::{RecordStore, StoreError};
use crate::state::{Collaborator, NewCollaborator};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Record store kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Collaborator>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Collaborator>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: &str,
        record: NewCollaborator,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Collaborator::from_new(id.clone(), record));
        tracing::debug!("Stored record {id} in {collection}");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> NewCollaborator {
        NewCollaborator {
            title: title.to_string(),
            email: "someone@example.com".to_string(),
            department: "IT".to_string(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_empty_collection_lists_nothing() {
        let store = InMemoryRecordStore::new();
        assert!(store.list_all("collaborators").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = InMemoryRecordStore::new();
        let first = store.insert("collaborators", record("Ana")).await.unwrap();
        let second = store.insert("collaborators", record("Bruno")).await.unwrap();
        assert_ne!(first, second);

        let listed = store.list_all("collaborators").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first);
        assert_eq!(listed[1].title, "Bruno");
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = InMemoryRecordStore::new();
        store.insert("collaborators", record("Ana")).await.unwrap();
        assert!(store.list_all("archived").await.unwrap().is_empty());
    }
}
