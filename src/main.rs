use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corsgate::cli::{Cli, Commands};
use corsgate::proxy::upstream::UpstreamClient;
use corsgate::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "corsgate=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut cfg = config::load()?;
    let args = Cli::parse();
    if let Some(Commands::Serve { port: Some(port) }) = args.command {
        cfg.port = port;
    }

    run_server(cfg).await
}

async fn run_server(cfg: config::Config) -> anyhow::Result<()> {
    let upstream = UpstreamClient::new(Duration::from_secs(cfg.upstream_timeout_secs));
    let port = cfg.port;
    let state = Arc::new(AppState {
        config: cfg,
        upstream,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("corsgate listening on {}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
