use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::analysis::analyzer::analyze_resume;
use crate::analysis::assembler::AnalysisRequest;
use crate::analysis::ingest::extract_text_blocking;
use crate::config::{LlmSettings, ModelConfig};
use crate::llm_client::{ChatModel, LlmClient};

#[derive(Parser)]
#[command(name = "hireflow", version)]
#[command(about = "Resume analysis and candidate scraping service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Analyze a resume against a job description and print the JSON result
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the resume file (.pdf, .docx or .txt)
    #[arg(long, short = 'r')]
    pub resume: PathBuf,

    /// Path to the job description file
    #[arg(long = "job-description", short = 'j')]
    pub job_description: Option<PathBuf>,

    /// Required years of experience for the role
    #[arg(long, short = 'e', default_value_t = 0)]
    pub experience: i64,

    /// Specific skills to evaluate
    #[arg(long, short = 's', num_args = 1..)]
    pub skills: Vec<String>,

    /// Path to save the output JSON file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// API key; overrides OPENAI_API_KEY
    #[arg(long = "api-key", short = 'k')]
    pub api_key: Option<String>,
}

/// `hireflow analyze`: prints the analysis, optionally saving it. Nothing is
/// uploaded or recorded.
pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let settings = LlmSettings::from_env_with_key(args.api_key.clone())?;
    let client = LlmClient::new(&settings)?;

    let result = analyze_files(&client, &settings.models, &args).await?;
    let pretty = serde_json::to_string_pretty(&result)?;

    if let Some(path) = &args.output {
        tokio::fs::write(path, &pretty)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("{pretty}");
    if let Some(path) = &args.output {
        println!("\nAnalysis saved to: {}", path.display());
    }
    Ok(())
}

/// Reads the resume (and job description, if given) through the same ingestor
/// the HTTP surface uses, then runs one analysis.
pub async fn analyze_files(
    llm: &dyn ChatModel,
    models: &ModelConfig,
    args: &AnalyzeArgs,
) -> Result<Value> {
    let resume_text = read_document(&args.resume).await?;
    let job_description = match &args.job_description {
        Some(path) => Some(read_document(path).await?),
        None => None,
    };
    info!(
        "Analyzing {} ({} chars of resume text)",
        args.resume.display(),
        resume_text.len()
    );

    let request = AnalysisRequest {
        resume_text,
        job_description,
        required_experience: args.experience,
        skills: (!args.skills.is_empty()).then(|| args.skills.clone()),
    };
    Ok(analyze_resume(llm, models, &request).await?)
}

async fn read_document(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    extract_text_blocking(Bytes::from(bytes), filename)
        .await
        .with_context(|| format!("Failed to extract text from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::fixtures::ANALYSIS_REPLY;
    use crate::analysis::ingest::fixtures;
    use crate::llm_client::testing::ScriptedModel;

    fn args(resume: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            resume,
            job_description: None,
            experience: 0,
            skills: Vec::new(),
            output: None,
            api_key: None,
        }
    }

    #[test]
    fn test_parses_short_flags() {
        let cli = Cli::try_parse_from([
            "hireflow", "analyze", "-r", "cv.pdf", "-j", "jd.txt", "-e", "4", "-s", "Rust", "SQL",
            "-o", "out.json", "-k", "sk-test",
        ])
        .unwrap();

        let Some(Command::Analyze(args)) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.resume, PathBuf::from("cv.pdf"));
        assert_eq!(args.job_description, Some(PathBuf::from("jd.txt")));
        assert_eq!(args.experience, 4);
        assert_eq!(args.skills, vec!["Rust", "SQL"]);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["hireflow"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resume_is_required() {
        assert!(Cli::try_parse_from(["hireflow", "analyze"]).is_err());
    }

    #[tokio::test]
    async fn test_analyze_files_reads_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("cv.docx");
        std::fs::write(&resume, fixtures::docx(&["Jane Doe", "Rust engineer"])).unwrap();
        let jd = dir.path().join("jd.txt");
        std::fs::write(&jd, "Senior Rust engineer, 5 years").unwrap();

        let mut args = args(resume);
        args.job_description = Some(jd);
        args.experience = 5;
        args.skills = vec!["Rust".to_string()];

        let model = ScriptedModel::new([Some(ANALYSIS_REPLY)]);
        let result = analyze_files(&model, &ModelConfig::default(), &args)
            .await
            .unwrap();
        assert!(result.get("selection_decision").is_some());

        let prompt = &model.recorded()[0].messages[1].content;
        assert!(prompt.contains("Jane Doe\nRust engineer"));
        assert!(prompt.contains("JOB DESCRIPTION: Senior Rust engineer, 5 years"));
        assert!(prompt.contains("The role requires 5 years"));
        assert!(prompt.contains(r#"["Rust"]"#));
    }

    #[tokio::test]
    async fn test_unsupported_resume_fails_before_llm() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("cv.rtf");
        std::fs::write(&resume, "{\\rtf1}").unwrap();

        let model = ScriptedModel::new([Some(ANALYSIS_REPLY)]);
        let err = analyze_files(&model, &ModelConfig::default(), &args(resume))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported"));
        assert!(model.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_missing_resume_file() {
        let model = ScriptedModel::new([Some(ANALYSIS_REPLY)]);
        let err = analyze_files(
            &model,
            &ModelConfig::default(),
            &args(PathBuf::from("/nonexistent/cv.pdf")),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
