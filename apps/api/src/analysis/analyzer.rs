//! Resume analysis pipeline.
//!
//! Flow: derive skills (only when none were given and a job description exists) →
//!       assemble prompt → one JSON-object completion → parse.
//!
//! The reply is returned as opaque JSON. Its shape is whatever the model chose to
//! emit; callers must read it defensively.

use serde_json::Value;
use tracing::info;

use crate::analysis::assembler::{build_analysis_prompt, AnalysisRequest};
use crate::analysis::prompts::ANALYSIS_SYSTEM;
use crate::analysis::skills::extract_skills;
use crate::config::ModelConfig;
use crate::errors::AppError;
use crate::llm_client::{ChatModel, ChatRequest, LlmError};

const ANALYSIS_TEMPERATURE: f32 = 0.5;

/// Runs one analysis. No retries: an upstream failure or an unparseable reply
/// fails the request.
pub async fn analyze_resume(
    llm: &dyn ChatModel,
    models: &ModelConfig,
    request: &AnalysisRequest,
) -> Result<Value, AppError> {
    info!("Starting resume analysis");

    let job_description = request
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty());

    let skills = match (&request.skills, job_description) {
        (Some(explicit), _) if !explicit.is_empty() => explicit.clone(),
        (_, Some(jd)) => {
            let derived = extract_skills(llm, &models.cleanup, jd).await;
            info!("Extracted skills from job description: {derived:?}");
            derived
        }
        _ => Vec::new(),
    };

    let resolved = AnalysisRequest {
        resume_text: request.resume_text.clone(),
        job_description: job_description.map(String::from),
        required_experience: request.required_experience,
        skills: Some(skills),
    };
    let prompt = build_analysis_prompt(&resolved);

    let chat = ChatRequest::new(&models.analysis)
        .system(ANALYSIS_SYSTEM)
        .user(prompt)
        .temperature(ANALYSIS_TEMPERATURE)
        .json_object();

    info!("Calling {} for resume analysis", models.analysis);
    let analysis = llm.complete_json(&chat).await.map_err(|e| match e {
        LlmError::Parse(e) => AppError::ResponseParse(format!("analysis reply is not valid JSON: {e}")),
        other => AppError::Llm(format!("Resume analysis failed: {other}")),
    })?;

    if !analysis.is_object() {
        return Err(AppError::ResponseParse(
            "analysis reply is not a JSON object".to_string(),
        ));
    }

    info!("Successfully received and parsed analysis response");
    Ok(analysis)
}
