//! Socksd - SOCKS5 Proxy Server
//!
//! This is the main entry point for the Socksd application.

use anyhow::{Context, Result};
use clap::Parser;
use socksd::config::{load_config, Config};
use socksd::Socks5Server;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Socksd - SOCKS5 proxy server with optional username/password auth
#[derive(Parser, Debug)]
#[command(name = "socksd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration file
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(&args.log_level, args.json_log)?;

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("Configuration loaded from: {:?}", path);
            config
        }
        None => Config::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    let context = config
        .socks
        .to_context()
        .with_context(|| "Failed to build SOCKS5 context")?;

    info!("Socksd v{}", socksd::VERSION);
    info!("Authentication method: {}", context.auth_method());

    let server = Socks5Server::bind(&config.server.bind_addr, context)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    // Setup shutdown signal
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server.run(shutdown_rx).await?;
    Ok(())
}

/// Wait for Ctrl+C, or SIGTERM on unix
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received Ctrl+C, shutting down...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down...");
                    }
                }
                return;
            }
            Err(e) => warn!("Failed to setup SIGTERM handler: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Received Ctrl+C, shutting down...");
}

/// Setup logging based on command line flags
///
/// `RUST_LOG` takes precedence over `--log-level` when set.
fn setup_logging(level: &str, json: bool) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    if json {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
