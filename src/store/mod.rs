//! Record store access: the gRPC client, an in-memory store, and the shared trait

mod client;
mod memory;
mod traits;

pub use client::{GrpcRecordStore, DEFAULT_ADDRESS};
pub use memory::InMemoryRecordStore;
pub use traits::{RecordStore, StoreError};

#[cfg(test)]
pub use traits::MockRecordStore;
