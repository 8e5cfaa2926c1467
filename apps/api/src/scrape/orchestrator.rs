//! Scrape Orchestrator.
//!
//! Flow: task script → browser agent (raw text) → cleanup model (fenced JSON) →
//!       parse → array of opaque candidate profiles.
//!
//! No retries. Any failure in either call or in parsing fails the whole scrape;
//! there is no partial-result recovery.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::render_template;
use crate::llm_client::{extract_fenced_json, ChatModel, ChatRequest};
use crate::scrape::browser::BrowserAgent;
use crate::scrape::prompts::{CLEANUP_PROMPT_TEMPLATE, TASK_SCRIPT};

#[derive(Debug, Error)]
pub enum CandidateParseError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a list of candidates")]
    NotAList,
}

/// Runs the task script, then coerces the agent's text into candidate records.
pub async fn scrape_candidates(
    agent: &dyn BrowserAgent,
    llm: &dyn ChatModel,
    cleanup_model: &str,
) -> Result<Vec<Value>, AppError> {
    info!("Starting candidate scrape");
    let raw_text = agent.run(TASK_SCRIPT).await?;
    info!("Browser agent returned {} chars", raw_text.len());

    let prompt = render_template(CLEANUP_PROMPT_TEMPLATE, &[("raw_text", &raw_text)]);
    let request = ChatRequest::new(cleanup_model).user(prompt);

    let reply = llm
        .complete(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Candidate cleanup failed: {e}")))?;

    let candidates = parse_candidates(&reply)?;
    info!("Parsed {} candidate profiles", candidates.len());
    Ok(candidates)
}

/// Reads the first ```json fenced block (or the whole reply when unfenced) as a
/// JSON array. Elements are not inspected.
pub fn parse_candidates(reply: &str) -> Result<Vec<Value>, CandidateParseError> {
    match serde_json::from_str::<Value>(extract_fenced_json(reply))? {
        Value::Array(items) => Ok(items),
        _ => Err(CandidateParseError::NotAList),
    }
}
