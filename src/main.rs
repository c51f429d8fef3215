//! Gateway process bootstrap.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geo_gateway::auth::token::TokenCodec;
use geo_gateway::config::{self, GatewayConfig};
use geo_gateway::geo::DadataClient;
use geo_gateway::http::{AppState, HttpServer};
use geo_gateway::lifecycle::Shutdown;
use geo_gateway::users::MemoryUserStore;

#[derive(Parser)]
#[command(
    name = "geo-gateway",
    about = "HTTP gateway for address search and a companion content service"
)]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geo_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        forward_target = %format!("{}:{}", config.forward.host, config.forward.port),
        geocoder = %config.geocoder.base_url,
        "configuration loaded"
    );

    let state = AppState {
        geo: Arc::new(DadataClient::new(&config.geocoder)),
        users: Arc::new(MemoryUserStore::default()),
        tokens: Arc::new(TokenCodec::new(config.auth.signing_key.as_bytes())),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signals();

    let server = HttpServer::new(config, state)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
