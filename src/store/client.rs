//! gRPC client for the remote record store
//!
//! Wraps the tonic bindings generated from `proto/record_store.proto` and maps
//! wire messages to the collaborator types used by the rest of the application.

use super::traits::{RecordStore, StoreError};
use crate::state::{Collaborator, NewCollaborator};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tonic::transport::Channel;

// Include the generated proto types
pub mod proto {
    tonic::include_proto!("recordstore");
}

use proto::record_store_client::RecordStoreClient;

/// Default record store address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50051";

/// Client for the remote record store
pub struct GrpcRecordStore {
    /// The gRPC client, established lazily
    client: Mutex<Option<RecordStoreClient<Channel>>>,
    /// The store address
    address: String,
}

impl GrpcRecordStore {
    /// Create a client and try to connect right away.
    ///
    /// A failed first connection is not an error; the next call retries.
    pub async fn connect(address: impl Into<String>) -> Self {
        let address = address.into();
        let client = match RecordStoreClient::connect(address.clone()).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Record store at {address} not reachable yet: {e}");
                None
            }
        };

        Self {
            client: Mutex::new(client),
            address,
        }
    }

    /// Ensure connection is established and hand out a clone of the channel client
    async fn ensure_connected(&self) -> Result<RecordStoreClient<Channel>, StoreError> {
        let mut guard = self.client.lock().await;
        if guard.is_none() {
            let client = RecordStoreClient::connect(self.address.clone())
                .await
                .map_err(|e| {
                    StoreError::Unavailable(format!("failed to connect to {}: {e}", self.address))
                })?;
            *guard = Some(client);
        }
        guard
            .clone()
            .ok_or_else(|| StoreError::Unavailable("client not connected".to_string()))
    }

    /// Drop the cached client so the next call reconnects
    async fn disconnect(&self) {
        *self.client.lock().await = None;
    }
}

#[async_trait]
impl RecordStore for GrpcRecordStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Collaborator>, StoreError> {
        let mut client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::ListAllRequest {
            collection: collection.to_string(),
        });

        let response = match client.list_all(request).await {
            Ok(response) => response,
            Err(status) => {
                self.disconnect().await;
                return Err(StoreError::Unavailable(format!(
                    "failed to list {collection}: {}",
                    status.message()
                )));
            }
        };

        let records = response
            .into_inner()
            .records
            .into_iter()
            .map(record_from_proto)
            .collect();

        Ok(records)
    }

    async fn insert(
        &self,
        collection: &str,
        record: NewCollaborator,
    ) -> Result<String, StoreError> {
        let mut client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::InsertRequest {
            collection: collection.to_string(),
            record: Some(fields_to_proto(record)),
        });

        let response = match client.insert(request).await {
            Ok(response) => response,
            Err(status) => {
                self.disconnect().await;
                return Err(StoreError::Unavailable(format!(
                    "failed to insert into {collection}: {}",
                    status.message()
                )));
            }
        };

        let inner = response.into_inner();
        if !inner.success {
            return Err(StoreError::Rejected(inner.error));
        }

        Ok(inner.id)
    }
}

fn fields_to_proto(record: NewCollaborator) -> proto::CollaboratorFields {
    proto::CollaboratorFields {
        title: record.title,
        email: record.email,
        department: record.department,
        active: record.active,
    }
}

fn record_from_proto(record: proto::StoredRecord) -> Collaborator {
    let fields = record.fields.unwrap_or_default();
    Collaborator {
        id: record.id,
        title: fields.title,
        email: fields.email,
        department: fields.department,
        active: fields.active,
        avatar: record.avatar.filter(|a| !a.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fields_to_proto_copies_all_fields() {
        let fields = fields_to_proto(NewCollaborator {
            title: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            department: "Design".to_string(),
            active: false,
        });
        assert_eq!(
            fields,
            proto::CollaboratorFields {
                title: "Ana Silva".to_string(),
                email: "ana@example.com".to_string(),
                department: "Design".to_string(),
                active: false,
            }
        );
    }

    #[test]
    fn test_record_from_proto_without_fields_uses_defaults() {
        let record = record_from_proto(proto::StoredRecord {
            id: "abc".to_string(),
            fields: None,
            avatar: None,
        });
        assert_eq!(record.id, "abc");
        assert_eq!(record.title, "");
        assert!(!record.active);
    }

    #[test]
    fn test_record_from_proto_drops_empty_avatar() {
        let record = record_from_proto(proto::StoredRecord {
            id: "abc".to_string(),
            fields: Some(proto::CollaboratorFields::default()),
            avatar: Some(String::new()),
        });
        assert!(record.avatar.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_store_reports_unavailable() {
        // Nothing listens on port 9 locally
        let store = GrpcRecordStore::connect("http://127.0.0.1:9").await;
        assert!(store.client.lock().await.is_none());
        let result = store.list_all("collaborators").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
