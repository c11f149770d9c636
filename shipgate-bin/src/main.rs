use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shipgate_core::{
    config::Config, dispatch::Dispatcher, registry::CarrierRegistry, storage::PgStore,
    transport::HttpTransport,
};

mod api;

#[derive(Parser)]
#[command(author, version, about = "shipgate multi-carrier shipping gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway
    Serve {
        #[arg(short, long, default_value = "shipgate.toml")]
        config: PathBuf,
    },
    /// Validate a configuration file and exit
    CheckConfig {
        #[arg(short, long, default_value = "shipgate.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::CheckConfig { config } => check_config(&config),
    }
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let cfg = Config::from_path(path)
        .with_context(|| format!("invalid config {}", path.display()))?;
    let carriers =
        usize::from(cfg.carriers.swift.is_some()) + usize::from(cfg.carriers.xps.is_some());
    println!("{} ok: {carriers} carrier(s) configured", path.display());
    Ok(())
}

async fn serve(path: &Path) -> anyhow::Result<()> {
    let cfg = Config::from_path(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;

    let store = PgStore::connect(&cfg.database)
        .await
        .context("failed to connect to the db")?;
    store
        .ensure_schema()
        .await
        .context("failed to prepare the shipment table")?;
    store.health_check().await.context("db ping failed")?;

    let transport = HttpTransport::from_config(&cfg.http)?;
    let registry = CarrierRegistry::from_config(&cfg);
    info!(carriers = registry.len(), "carrier registry built");

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(registry),
        Arc::new(transport),
        Arc::new(store),
    ));
    let app = api::create_routes(api::AppState { dispatcher });

    let listener = TcpListener::bind(&cfg.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind))?;
    info!(addr = %cfg.server.bind, "http server start");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown received, closing gracefully");
}
