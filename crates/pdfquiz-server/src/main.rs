//! PDF Quiz Server CLI
//!
//! Starts the HTTP server that turns uploaded PDFs into quiz questions.

use anyhow::Context;
use clap::Parser;
use pdfquiz_server::{config::ServerConfig, start_server};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// PDF Quiz Server - generate question/answer pairs from PDF uploads.
#[derive(Debug, Parser)]
#[command(name = "pdfquiz-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load configuration from TOML file
    #[arg(short, long, env = "PDFQUIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind_address: Option<String>,

    /// Override the bind port
    #[arg(short = 'p', long)]
    bind_port: Option<u16>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            tracing::warn!("No config file specified, using defaults");
            ServerConfig::default_config()
        }
    };

    if let Some(address) = cli.bind_address {
        config.bind_address = address;
    }
    if let Some(port) = cli.bind_port {
        config.bind_port = port;
    }

    start_server(config).await?;

    Ok(())
}
