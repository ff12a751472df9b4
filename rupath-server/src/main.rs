use std::sync::Arc;

use clap::Parser;
use rupath_core::create_campus_model;
use rupath_server::fallback::LlmClient;
use rupath_server::{AppState, Args, ServerConfig, build_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "rupath_server=info,rupath_core=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::load(args.config.as_deref())?;
    config.apply_args(&args);

    info!("Loading campus datasets");
    let dataset = config.dataset.clone();
    let model = tokio::task::spawn_blocking(move || create_campus_model(&dataset)).await??;

    let llm = LlmClient::from_env(&config.fallback);
    let state = Arc::new(AppState::new(Arc::new(model), llm));
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
