mod analysis;
mod cli;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod scrape;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scrape::browser::RemoteBrowserAgent;
use crate::state::AppState;
use crate::storage::postgres::PgRecordStore;
use crate::storage::s3::S3ObjectStore;
use crate::storage::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Analyze(args)) => {
            init_tracing("warn");
            cli::run_analyze(args).await
        }
        Some(Command::Serve) | None => serve().await,
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting hireflow v{}", env!("CARGO_PKG_VERSION"));

    // Single database pool, shared by every request
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let records = Arc::new(PgRecordStore::new(db));

    let objects = Arc::new(S3ObjectStore::from_config(&config).await);
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let llm = Arc::new(LlmClient::new(&config.llm)?);
    info!(
        "LLM client initialized (analysis: {}, cleanup: {})",
        config.llm.models.analysis, config.llm.models.cleanup
    );

    // Single browser session, shared by every scrape
    let agent = Arc::new(
        RemoteBrowserAgent::connect(
            &config.browser_agent_url,
            &config.llm.models.agent,
            &config.browser_cdp_url,
        )
        .await?,
    );

    let state = AppState {
        llm,
        models: config.llm.models.clone(),
        objects,
        records: records.clone(),
        agent: agent.clone(),
        scrape_lock: Arc::new(Mutex::new(())),
        candidate_collection: config.candidate_collection.clone(),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Browser session and database pool go down together
    agent.session().close();
    records.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
