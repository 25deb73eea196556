//! KitchenPlan Web Server Binary
//!
//! This binary starts the KitchenPlan web server that provides a REST API
//! for a browser-based planner frontend.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, configured workspace)
//! kitchenplan-web
//!
//! # Specify port and workspace
//! kitchenplan-web --port 8080 --workspace ~/kitchens
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchenplan::config::Config;
use kitchenplan::web;

/// KitchenPlan Web Server - REST API for the kitchen planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Workspace directory containing project files.
    /// Defaults to `[paths] workspace` from the config, or the
    /// `projects` directory next to the config file.
    #[arg(short, long)]
    workspace: Option<PathBuf>,

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
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let workspace_root = match args.workspace {
        Some(path) => path,
        None => config.workspace_dir()?,
    };

    if !workspace_root.exists() {
        std::fs::create_dir_all(&workspace_root).context(format!(
            "Failed to create workspace directory: {}",
            workspace_root.display()
        ))?;
    }

    info!("Workspace root: {}", workspace_root.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, workspace_root, addr).await
}
