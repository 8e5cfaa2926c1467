//! Persistence seams: an object store for original resume files and a record
//! store for analysis results and scraped candidate profiles.
//!
//! Both are carried in `AppState` as `Arc<dyn ...>` and swapped for in-memory
//! fakes in tests.

pub mod postgres;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::applicant::ApplicantRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object store: {0}")]
    ObjectStore(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

/// Where an uploaded object ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub public_url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `bytes` under `key` and returns the object's public location.
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_applicant(&self, record: &ApplicantRecord) -> Result<Uuid, StorageError>;

    /// Inserts every profile verbatim into `collection`. Returns the number written.
    async fn insert_candidates(
        &self,
        collection: &str,
        candidates: &[Value],
    ) -> Result<u64, StorageError>;

    /// Releases the underlying connection(s). Called once at shutdown.
    async fn close(&self);
}
