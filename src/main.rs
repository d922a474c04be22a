use anyhow::{Context, Result};
use rustyroster::{
    api::{self, AppState},
    config, logging,
    store::StudentStore,
    summarization::StudentSummarizer,
};
use std::{net::Ipv4Addr, sync::Arc};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing();

    let summarizer =
        StudentSummarizer::from_config(config).context("failed to build summarization client")?;
    let app = api::create_router(AppState::new(Arc::new(StudentStore::new()), summarizer));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;
    tracing::info!(
        port = config.server_port,
        ollama_url = %config.ollama_url,
        model = %config.summary_model,
        "Server starting on http://0.0.0.0:{}",
        config.server_port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}
