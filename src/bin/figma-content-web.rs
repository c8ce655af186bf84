//! Figma Content Web Server Binary
//!
//! This binary starts the web server that lets a design tool plugin
//! generate, preview and apply content entries over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3002, token directory from config)
//! figma-content-web
//!
//! # Specify port and token directory
//! figma-content-web --port 8080 --tokens-dir ./design-tokens
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use figma_content::config::Config;
use figma_content::web;

/// Figma Content Web Server - REST API for content tokens
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3002")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding the token files (overrides config)
    #[arg(short, long, value_name = "DIR")]
    tokens_dir: Option<PathBuf>,

    /// Use a specific config file instead of the platform default
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let tokens_dir = config.tokens_dir(args.tokens_dir.as_deref());
    info!("Token directory: {}", tokens_dir.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(config, tokens_dir, addr).await
}
