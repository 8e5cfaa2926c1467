use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::scrape::orchestrator::scrape_candidates;
use crate::state::AppState;

const STORE_FIELD: &str = "store_in_db";

/// Form options of a scrape request. The body may be urlencoded, multipart or
/// empty; a missing `store_in_db` means false.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrapeOptions {
    pub store_in_db: bool,
}

#[async_trait]
impl<S> FromRequest<S> for ScrapeOptions
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let raw = if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            let mut value = None;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
            {
                if field.name() == Some(STORE_FIELD) {
                    value = Some(field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read {STORE_FIELD}: {e}"))
                    })?);
                }
            }
            value
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            fields.get(STORE_FIELD).cloned()
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            if !body.iter().all(u8::is_ascii_whitespace) {
                return Err(AppError::Validation(format!(
                    "{STORE_FIELD} must be sent as a form field"
                )));
            }
            None
        };

        let store_in_db = match raw {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };
        Ok(Self { store_in_db })
    }
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{STORE_FIELD} must be a boolean, got '{other}'"
        ))),
    }
}

/// POST /api/scrape-candidates
///
/// Scrapes are serialized on `scrape_lock`; a second caller waits for the first.
pub async fn handle_scrape_candidates(
    State(state): State<AppState>,
    options: ScrapeOptions,
) -> Result<Json<Value>, AppError> {
    let _session = state.scrape_lock.lock().await;

    let candidates =
        scrape_candidates(state.agent.as_ref(), state.llm.as_ref(), &state.models.cleanup).await?;

    if options.store_in_db {
        let written = state
            .records
            .insert_candidates(&state.candidate_collection, &candidates)
            .await?;
        info!(
            "Stored {written} candidates in '{}'",
            state.candidate_collection
        );
    }

    Ok(Json(json!({ "candidates": candidates })))
}
