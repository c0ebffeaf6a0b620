use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pdf_summarizer::application::services::{
    CooldownTracker, DocumentSummaryService, SummarizationService,
};
use pdf_summarizer::infrastructure::clock::SystemClock;
use pdf_summarizer::infrastructure::llm::ProviderFactory;
use pdf_summarizer::infrastructure::observability::{TracingConfig, init_tracing};
use pdf_summarizer::infrastructure::text_processing::{ParagraphSplitter, PdfAdapter};
use pdf_summarizer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        settings.logging.level.clone(),
    ));

    let providers =
        ProviderFactory::from_env(&settings.providers).context("Failed to configure providers")?;

    let cooldowns = Arc::new(CooldownTracker::new(settings.cooldown.duration()));
    let summarizer = Arc::new(SummarizationService::new(
        providers,
        Arc::clone(&cooldowns),
        Arc::new(SystemClock),
    ));

    let summary_service = Arc::new(DocumentSummaryService::new(
        Arc::new(PdfAdapter::new()),
        Arc::new(ParagraphSplitter::new(settings.chunking.max_chunk_chars)),
        summarizer,
        settings.limits.max_pages,
    ));

    let state = AppState { summary_service };
    let router = create_router(state, settings.server.max_upload_bytes());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    tracing::info!(
        %addr,
        environment = %environment,
        max_pages = settings.limits.max_pages,
        max_chunk_chars = settings.chunking.max_chunk_chars,
        cooldown_secs = settings.cooldown.duration_secs,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
