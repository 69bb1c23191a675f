use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use signaid_config::log::{LogConfig, LogFormat};
use signaid_core::vocabulary::Vocabulary;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub mod error;
pub mod middleware;
pub mod profile;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

use self::state::AppState;

/// Text to ASL sign matching server
#[derive(Parser, Debug)]
#[command(name = "signaid", version)]
struct Args {
    /// JSON config profile; environment variables override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config = profile::load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.log);

    let state = AppState::from_config(config)?;
    let address = state.config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    let vocabulary = state.vocabulary().metadata();
    tracing::info!(
        "Loaded {} v{} with {} signs, remote matching {}",
        vocabulary.name,
        vocabulary.version,
        vocabulary.entry_count,
        if state.remote.is_some() { "enabled" } else { "disabled" }
    );
    tracing::info!("Listening on http://{}", address);

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_ctrl_c(cancel.clone()));

    run(server::build_router(state), listener, cancel).await
}

/// Serve until `cancel` fires, then drain in-flight requests
pub async fn run(app: Router, listener: TcpListener, cancel: CancellationToken) -> anyhow::Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { cancel.cancelled().await })
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_on_ctrl_c(cancel: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
        Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
    }
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(atty::is(atty::Stream::Stdout)))
            .init(),
    }
}
