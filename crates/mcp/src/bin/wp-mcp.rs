// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use wp_mcp::server::McpServer;
use wp_mcp::tools::default_registry;
use wp_mcp_core::ApiConfig;

#[derive(Parser, Debug)]
#[command(name = "wp-mcp")]
#[command(about = "MCP server for weather alerts, forecasts, and recent blog posts", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "WP_MCP_CONFIG", default_value = "wp-mcp.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wp_mcp=info,wp_mcp_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!(error = ?e, "Fatal error in main()");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    tracing::info!("wp-mcp server starting...");

    let config = Arc::new(ApiConfig::load(&args.config)?);
    tracing::info!(
        weather_base = %config.weather_base,
        blog_base = %config.blog_base,
        timeout_secs = config.timeout_secs,
        "Loaded configuration"
    );

    let registry = default_registry(config).context("Failed to create HTTP client")?;
    tracing::info!("Registered {} tools", registry.len());

    McpServer::new(registry).start().await?;

    tracing::info!("wp-mcp server stopped");
    Ok(())
}
