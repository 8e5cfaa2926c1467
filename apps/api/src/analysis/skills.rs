//! Skill lists: the comma-separated form field, and the top-5 skills derived from a
//! job description by a side LLM call.
//!
//! Parsing the model's list is lenient-then-fallback: a JSON list if the reply is
//! one, otherwise brackets are stripped and the text is split on commas. The
//! fallback happily turns prose into "skills". Treat it as best effort.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::analysis::prompts::{SKILL_EXTRACTION_PROMPT, SKILL_EXTRACTION_SYSTEM};
use crate::llm_client::prompts::render_template;
use crate::llm_client::{strip_json_fences, ChatModel, ChatRequest};

const SKILL_EXTRACTION_TEMPERATURE: f32 = 0.3;

/// Splits the `skills` form field on commas. Blank entries are dropped; a field
/// with no usable entries counts as absent.
pub fn parse_skills_field(raw: Option<&str>) -> Option<Vec<String>> {
    let skills: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    (!skills.is_empty()).then_some(skills)
}

/// Asks the cleanup model for the top 5 skills in `job_description`.
///
/// Never fails: a transport or API error yields an empty list.
pub async fn extract_skills(llm: &dyn ChatModel, model: &str, job_description: &str) -> Vec<String> {
    info!("Extracting skills from job description");

    let prompt = render_template(SKILL_EXTRACTION_PROMPT, &[("job_description", job_description)]);
    let request = ChatRequest::new(model)
        .system(SKILL_EXTRACTION_SYSTEM)
        .user(prompt)
        .temperature(SKILL_EXTRACTION_TEMPERATURE);

    match llm.complete(&request).await {
        Ok(reply) => parse_skill_list(&reply),
        Err(e) => {
            error!("Error extracting skills: {e}");
            Vec::new()
        }
    }
}

/// Reads a list of skills out of a model reply.
pub fn parse_skill_list(reply: &str) -> Vec<String> {
    let body = strip_json_fences(reply);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Ok(_) => {
            warn!("Skill reply was JSON but not a list; falling back to comma split");
            split_skill_text(body)
        }
        Err(e) => {
            warn!("Error parsing skills list: {e}; falling back to comma split");
            split_skill_text(body)
        }
    }
}

fn split_skill_text(reply: &str) -> Vec<String> {
    reply
        .replace(['[', ']'], "")
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
