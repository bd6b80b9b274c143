//! pagebridge server binary
//!
//! HTTP gateway translating simple REST calls into Notion content API
//! operations.
//!
//! ## Usage
//!
//! ```bash
//! # Run with environment configuration (.env is honored)
//! pagebridge-server
//!
//! # Override the listen port / bind address
//! pagebridge-server --port 8080 --bind 127.0.0.1
//! ```
//!
//! Environment: `NOTION_TOKEN` (required), `API_KEY` (caller secret),
//! `PORT`, `NOTION_BASE_URL`, `RUST_LOG`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pagebridge_notion::NotionHttpClient;
use pagebridge_server::constants::DEFAULT_BIND_ADDRESS;
use pagebridge_server::{AppState, ServerConfig, router};

/// HTTP gateway in front of the Notion content API.
#[derive(Debug, Parser)]
#[command(name = "pagebridge-server")]
#[command(about = "Simplified REST endpoints backed by Notion")]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_env()?;
    let port = args.port.unwrap_or(config.port);

    if config.api_key.is_none() {
        tracing::warn!("API_KEY not set; every request will be rejected until it is configured");
    }

    let notion = match config.notion_base_url.as_deref() {
        Some(base_url) => NotionHttpClient::with_base_url(&config.notion_token, base_url)?,
        None => NotionHttpClient::new(&config.notion_token)?,
    };
    let state = AppState::new(Arc::new(notion), config.api_key);

    let addr: SocketAddr = format!("{}:{port}", args.bind)
        .parse()
        .with_context(|| format!("invalid bind address {}:{port}", args.bind))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("pagebridge listening on {addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
