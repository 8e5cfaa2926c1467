//! Axum route handler for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::analysis::analyzer::analyze_resume;
use crate::analysis::assembler::AnalysisRequest;
use crate::analysis::ingest::extract_text_blocking;
use crate::analysis::relay::{persist_analysis, UploadedDocument};
use crate::analysis::skills::parse_skills_field;
use crate::errors::AppError;
use crate::state::AppState;

/// The multipart fields of an analysis request.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<UploadedDocument>,
    job_description: Option<String>,
    required_experience: i64,
    skills: Option<String>,
}

/// POST /api/analyze-resume
///
/// Multipart: `resume` (file, required), `job_description`, `required_experience`
/// (integer, default 0), `skills` (comma-separated). Returns the analysis verbatim
/// after the file and the analysis have been stored.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_form(multipart).await?;

    let upload = form
        .resume
        .filter(|r| !r.filename.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!(
        "Analyzing '{}' ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );

    let resume_text = extract_text_blocking(upload.bytes.clone(), upload.filename.clone()).await?;

    let request = AnalysisRequest {
        resume_text,
        job_description: form
            .job_description
            .map(|jd| jd.trim().to_string())
            .filter(|jd| !jd.is_empty()),
        required_experience: form.required_experience,
        skills: parse_skills_field(form.skills.as_deref()),
    };

    let analysis = analyze_resume(state.llm.as_ref(), &state.models, &request).await?;

    persist_analysis(
        state.objects.as_ref(),
        state.records.as_ref(),
        &upload,
        &analysis,
    )
    .await?;

    Ok(Json(analysis))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                form.resume = Some(UploadedDocument {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "job_description" => form.job_description = Some(read_text(field).await?),
            "required_experience" => {
                let raw = read_text(field).await?;
                form.required_experience = parse_required_experience(&raw)?;
            }
            "skills" => form.skills = Some(read_text(field).await?),
            // Unknown fields are ignored, as a form-based client would expect.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))
}

fn parse_required_experience(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i64>().map_err(|_| {
        AppError::Validation(format!(
            "required_experience must be an integer, got '{raw}'"
        ))
    })
}
