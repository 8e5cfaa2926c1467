use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata written for every analyzed resume: where the original file lives,
/// the analysis verbatim, and when it was uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicantRecord {
    pub resume_url: String,
    pub analysis_result: Value,
    pub uploaded_at: DateTime<Utc>,
}
