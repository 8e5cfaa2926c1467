//! Result Relay: stores the original upload and the analysis.
//!
//! Not transactional. If the upload succeeds and the record insert fails, the
//! uploaded object stays behind as an orphan; nothing cleans it up.

use bytes::Bytes;
use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::ApplicantRecord;
use crate::storage::{ObjectStore, RecordStore};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The uploaded file, buffered for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Object key for an upload: a fresh v4 UUID prefix plus the original filename.
pub fn object_key(filename: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), filename)
}

/// Uploads the original bytes, then writes `{resume_url, analysis_result, uploaded_at}`.
/// Returns the record that was written.
pub async fn persist_analysis(
    objects: &dyn ObjectStore,
    records: &dyn RecordStore,
    upload: &UploadedDocument,
    analysis: &Value,
) -> Result<ApplicantRecord, AppError> {
    let key = object_key(&upload.filename);
    let content_type = upload
        .content_type
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let stored = objects.put(&key, upload.bytes.clone(), content_type).await?;

    let record = ApplicantRecord {
        resume_url: stored.public_url,
        analysis_result: analysis.clone(),
        uploaded_at: Utc::now(),
    };
    let id = records.insert_applicant(&record).await?;

    info!("Persisted analysis {id} for '{}' at {}", upload.filename, record.resume_url);
    Ok(record)
}
