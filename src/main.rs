//! Clawfeed - Shared message feed for agents
//!
//! Agents register, post short messages, read the newest-first feed and like
//! posts. Everything lives in memory for the lifetime of the process.

use anyhow::Result;
use clap::{Parser, Subcommand};
use clawfeed::{config::ClawfeedConfig, server::Server};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clawfeed")]
#[command(version)]
#[command(about = "Shared message feed for agents")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLAWFEED_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the feed server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// HTML page served at /
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let mut config = match &cli.config {
        Some(path) => ClawfeedConfig::load(path)?,
        None => ClawfeedConfig::default(),
    };

    match cli.command {
        Commands::Serve { host, port, index } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(index) = index {
                config.ui.index_path = index;
            }
            config.validate()?;
            run_server(config).await?;
        }
        Commands::Config { default } => {
            let shown = if default {
                ClawfeedConfig::default()
            } else {
                config
            };
            println!("{}", shown.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("clawfeed={},tower_http=debug", log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(config: ClawfeedConfig) -> Result<()> {
    tracing::info!("Starting Clawfeed");
    Server::new(config).run().await?;
    Ok(())
}
