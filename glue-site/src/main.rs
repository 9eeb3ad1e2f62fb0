//! glue-site - GLUE site service
//!
//! Backend-of-record for page content, participant directory and the page
//! compositions rendered through the fallback-safe content loader.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glue_common::config::{Config, ConfigOverrides, Environment};
use glue_common::content::{ContentLoader, HttpFetcher, MemoryCache, ResponseCache};
use glue_common::sections::standard_registry;
use glue_site::{build_router, db, AppState};
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for glue-site
#[derive(Parser, Debug)]
#[command(name = "glue-site")]
#[command(about = "GLUE site service with fallback-safe content loading")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "GLUE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Base URL the content loader fetches sections from
    #[arg(long)]
    backend_url: Option<String>,

    /// Serve every section from its fallback, never fetching
    #[arg(long)]
    offline: bool,

    /// development or production
    #[arg(long)]
    environment: Option<Environment>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config,
            port: self.port,
            database_path: self.database,
            backend_url: self.backend_url,
            offline: self.offline.then_some(true),
            environment: self.environment,
            admin_token: None,
            log_level: self.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = args.into_overrides().or(ConfigOverrides::from_env()?);
    let config = Config::resolve(overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.log_level).into()),
        )
        .init();

    info!("Starting GLUE site (glue-site) v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = match db::connect(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {:#}", e);
            return Err(e);
        }
    };

    let registry = standard_registry().context("Content section registry is invalid")?;
    info!(sections = registry.len(), "✓ Content sections registered");

    let cache: Arc<dyn ResponseCache> = Arc::new(MemoryCache::new());
    let fetcher = HttpFetcher::new(
        config.backend_url.clone(),
        config.fetch_timeout,
        cache.clone(),
    )
    .context("Failed to build HTTP client")?;
    let loader = ContentLoader::new(Arc::new(registry), Arc::new(fetcher), config.mode);

    let state = AppState::new(
        pool,
        loader,
        cache,
        config.admin_token.clone(),
        config.environment,
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("glue-site listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
