//! vdash-ft (Fine-tune Review) - Sample review service for the
//! voice-assistant dashboard
//!
//! Holds the review state (selection, pending edits, debounced auto-save)
//! and consumes the dataset backend API. Serves JSON plus an SSE
//! notification stream for the dashboard front-end.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use vdash_common::config::ReviewConfig;
use vdash_ft::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "vdash-ft", version, about = "Fine-tuning sample review service")]
struct Cli {
    /// Base URL of the dataset backend
    #[arg(long)]
    backend_url: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Auto-save debounce delay in milliseconds
    #[arg(long)]
    autosave_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting VDash Fine-tune Review (vdash-ft) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();

    // Resolution order: CLI > environment > config file > default
    let mut config = ReviewConfig::load();
    if let Some(backend_url) = cli.backend_url {
        config.backend_url = backend_url;
    }
    if let Some(port) = cli.port {
        config.listen_port = port;
    }
    if let Some(delay) = cli.autosave_delay_ms {
        config.autosave_delay_ms = delay;
    }
    config.validate()?;

    info!("Backend API: {}", config.backend_url);
    info!(
        "Auto-save: {} ms debounce, batches of {}",
        config.autosave_delay_ms, config.save_batch_size
    );

    let state = AppState::new(&config)?;

    // Initial dataset load; the service stays up on failure and the
    // dashboard can retry via /api/review/refresh
    match state.controller.load().await {
        Ok(count) => info!("✓ Loaded {} samples from backend", count),
        Err(e) => error!("Initial sample load failed (refresh to retry): {}", e),
    }

    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("vdash-ft listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
