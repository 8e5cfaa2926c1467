//! Browser agent: drives a browser over the Chrome DevTools Protocol by handing a
//! natural-language task to an agent service.
//!
//! One `BrowserSession` is opened at startup and shared for the life of the
//! process. The session is a serialization point; callers hold
//! `AppState::scrape_lock` while a task runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

const HANDSHAKE_TIMEOUT_SECS: u64 = 10;
const AGENT_TIMEOUT_SECS: u64 = 1800;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("agent error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("browser session is closed")]
    SessionClosed,

    #[error("agent returned no result")]
    EmptyResult,
}

/// Runs one task to completion and returns whatever text the agent produced.
#[async_trait]
pub trait BrowserAgent: Send + Sync {
    async fn run(&self, task: &str) -> Result<String, AgentError>;

    /// Releases the browser session. Further runs fail with `SessionClosed`.
    async fn close(&self);
}

/// Reply of `GET /json/version` on a DevTools endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// The shared handle on the remote browser.
pub struct BrowserSession {
    cdp_url: String,
    version: Option<BrowserVersion>,
    closed: AtomicBool,
}

impl BrowserSession {
    /// Probes the DevTools endpoint. An unreachable browser is logged, not fatal:
    /// the agent service may start it later.
    pub async fn connect(client: &Client, cdp_url: &str) -> Self {
        let cdp_url = cdp_url.trim_end_matches('/').to_string();
        let version = match fetch_version(client, &cdp_url).await {
            Ok(version) => {
                info!(
                    "Browser session on {cdp_url}: {} ({})",
                    version.browser, version.web_socket_debugger_url
                );
                Some(version)
            }
            Err(e) => {
                warn!("Browser at {cdp_url} not reachable yet: {e}");
                None
            }
        };

        Self {
            cdp_url,
            version,
            closed: AtomicBool::new(false),
        }
    }

    pub fn cdp_url(&self) -> &str {
        &self.cdp_url
    }

    pub fn version(&self) -> Option<&BrowserVersion> {
        self.version.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("Browser session on {} closed", self.cdp_url);
        }
    }
}

async fn fetch_version(client: &Client, cdp_url: &str) -> Result<BrowserVersion, AgentError> {
    let response = client
        .get(format!("{cdp_url}/json/version"))
        .timeout(Duration::from_secs(HANDSHAKE_TIMEOUT_SECS))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AgentError::Api {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }
    Ok(response.json().await?)
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    task: &'a str,
    llm_model: &'a str,
    cdp_url: &'a str,
}

/// Agent service reached over HTTP: `POST {agent_url}/run`.
pub struct RemoteBrowserAgent {
    client: Client,
    run_url: String,
    model: String,
    session: BrowserSession,
}

impl RemoteBrowserAgent {
    pub async fn connect(agent_url: &str, model: &str, cdp_url: &str) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(AGENT_TIMEOUT_SECS))
            .build()?;
        let session = BrowserSession::connect(&client, cdp_url).await;

        Ok(Self {
            client,
            run_url: format!("{}/run", agent_url.trim_end_matches('/')),
            model: model.to_string(),
            session,
        })
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }
}

#[async_trait]
impl BrowserAgent for RemoteBrowserAgent {
    async fn run(&self, task: &str) -> Result<String, AgentError> {
        if self.session.is_closed() {
            return Err(AgentError::SessionClosed);
        }

        info!("Running browser task with {} via {}", self.model, self.run_url);
        let response = self
            .client
            .post(&self.run_url)
            .json(&RunRequest {
                task,
                llm_model: &self.model,
                cdp_url: self.session.cdp_url(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_agent_reply(&body)
    }

    async fn close(&self) {
        self.session.close();
    }
}

/// Reads the agent's final text. JSON replies carry it under `final_result` or
/// `result`; anything else is taken as plain text.
pub fn parse_agent_reply(body: &str) -> Result<String, AgentError> {
    let text = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut map)) => match map.remove("final_result").or_else(|| map.remove("result")) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        },
        Ok(Value::String(s)) => s,
        _ => body.to_string(),
    };

    if text.trim().is_empty() {
        return Err(AgentError::EmptyResult);
    }
    Ok(text)
}
