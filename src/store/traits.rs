//! Trait abstraction for the record store to enable mocking in tests

use crate::state::{Collaborator, NewCollaborator};
use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the record store.
///
/// Callers treat every variant the same way; the split only keeps log lines useful.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or the call failed in transit
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    /// The store answered but refused the request
    #[error("record store rejected the request: {0}")]
    Rejected(String),
}

/// Document store holding collaborator records, grouped by collection name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every record in a collection
    async fn list_all(&self, collection: &str) -> Result<Vec<Collaborator>, StoreError>;

    /// Insert a record and return the store-assigned id
    async fn insert(&self, collection: &str, record: NewCollaborator)
        -> Result<String, StoreError>;
}
