//! Prompt Assembler: builds the single analysis instruction from the resume text,
//! the job description, the experience requirement and the skill list.

use crate::analysis::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, EXPERIENCE_INSTRUCTION, SKILL_LIST_INSTRUCTION,
    SKILL_SELF_DERIVE_INSTRUCTION,
};
use crate::llm_client::prompts::render_template;

/// Everything one analysis needs. Explicit skills win; otherwise skills are derived
/// from the job description before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub required_experience: i64,
    pub skills: Option<Vec<String>>,
}

/// Renders the analysis instruction from a resolved request: `skills` holds the
/// final list (explicit or derived). A missing or empty list asks the model to
/// derive skills itself; a missing job description renders as empty text.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let experience_instruction = experience_instruction(request.required_experience);
    let skill_instruction = skill_instruction(request.skills.as_deref().unwrap_or_default());

    render_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume_text", &request.resume_text),
            (
                "job_description",
                request.job_description.as_deref().unwrap_or_default(),
            ),
            ("experience_instruction", &experience_instruction),
            ("skill_instruction", &skill_instruction),
        ],
    )
}

fn experience_instruction(required_experience: i64) -> String {
    if required_experience > 0 {
        render_template(
            EXPERIENCE_INSTRUCTION,
            &[("years", &required_experience.to_string())],
        )
    } else {
        String::new()
    }
}

fn skill_instruction(skills: &[String]) -> String {
    if skills.is_empty() {
        return SKILL_SELF_DERIVE_INSTRUCTION.to_string();
    }

    let quoted = skills
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");
    render_template(SKILL_LIST_INSTRUCTION, &[("skills", &quoted)])
}
