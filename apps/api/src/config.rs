use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    /// Base URL that object keys are appended to when building public links.
    pub s3_public_base_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub llm: LlmSettings,
    pub browser_cdp_url: String,
    pub browser_agent_url: String,
    /// Collection name scraped candidates are filed under.
    pub candidate_collection: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// The subset of configuration needed to talk to the chat-completion API.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub models: ModelConfig,
}

/// Which model serves which call. Analysis runs on one model; skill extraction
/// and scrape cleanup run on the other.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub analysis: String,
    pub cleanup: String,
    /// Model the browser agent drives the page with.
    pub agent: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            analysis: "gpt-4o-mini".to_string(),
            cleanup: "gpt-4o".to_string(),
            agent: "gpt-4o".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_public_base_url = std::env::var("S3_PUBLIC_BASE_URL").unwrap_or_else(|_| {
            format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket)
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket,
            s3_endpoint,
            s3_region: optional_env("S3_REGION", "us-east-1"),
            s3_public_base_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            llm: LlmSettings::from_env()?,
            browser_cdp_url: optional_env("BROWSER_CDP_URL", "http://localhost:9222"),
            browser_agent_url: optional_env("BROWSER_AGENT_URL", "http://localhost:8001"),
            candidate_collection: optional_env("CANDIDATE_COLLECTION", "Cyber Security"),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

impl LlmSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Same as `from_env`, but an explicit key takes precedence over `OPENAI_API_KEY`.
    pub fn from_env_with_key(api_key: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = match api_key {
            Some(key) => key,
            None => require_env("OPENAI_API_KEY")?,
        };
        let defaults = ModelConfig::default();
        Ok(LlmSettings {
            api_key,
            base_url: optional_env("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            models: ModelConfig {
                analysis: optional_env("ANALYSIS_MODEL", &defaults.analysis),
                cleanup: optional_env("CLEANUP_MODEL", &defaults.cleanup),
                agent: optional_env("AGENT_MODEL", &defaults.agent),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
