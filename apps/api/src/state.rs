use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ModelConfig;
use crate::llm_client::ChatModel;
use crate::scrape::browser::BrowserAgent;
use crate::storage::{ObjectStore, RecordStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; every handle is an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ChatModel>,
    pub models: ModelConfig,
    pub objects: Arc<dyn ObjectStore>,
    pub records: Arc<dyn RecordStore>,
    /// Bound to the single browser session opened at startup.
    pub agent: Arc<dyn BrowserAgent>,
    /// Held for the duration of a scrape so runs never share the browser.
    pub scrape_lock: Arc<Mutex<()>>,
    pub candidate_collection: String,
    pub max_upload_bytes: usize,
}
