mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use notebridge_client::NotesClient;
use notebridge_core::config::load_dotenv;
use notebridge_mcp::{McpServer, StdioTransport};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries protocol traffic; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    config.log_summary();

    let api = Arc::new(NotesClient::new(&config));
    let mut server = McpServer::for_api(api)
        .context("failed to build tool catalog")?
        .with_name(config.server_name.clone());

    info!(version = env!("CARGO_PKG_VERSION"), "notebridge starting on stdio");
    let mut transport = StdioTransport::new();
    server.run(&mut transport).await.context("MCP server failed")?;

    info!("notebridge stopped");
    Ok(())
}
