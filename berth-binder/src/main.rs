//! Berth Binder daemon
//!
//! Single-process binding service: watches for storage claims in its
//! namespace, resolves each to a backup repository record, and records the
//! binding. Callers observe the bound claim through their own watch.
//!
//! Architecture:
//! - Configuration: namespace selection from environment or defaults
//! - Store: injected claim/repository store handles (in-memory here; a
//!   networked declarative store plugs in at the same traits)
//! - Binder: find-or-create repository resolution per claim
//! - Watcher: claim event loop dispatching the binder

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use berth_binder::binder::RepositoryBinder;
use berth_binder::config::Config;
use berth_binder::watcher::ClaimWatcher;
use berth_store::InMemoryStore;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "berth_binder=info,berth_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Berth Binder");

    let config = load_config()?;
    info!("Loaded configuration: namespace={}", config.namespace);

    let store = Arc::new(InMemoryStore::new());
    let binder = RepositoryBinder::new(store.clone(), store.clone());
    let watcher = ClaimWatcher::new(store.clone(), binder, config.namespace.clone());

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    if let Err(e) = watcher.run(cancel).await {
        error!("Watcher error: {:#}", e);
        return Err(e);
    }

    info!("Berth Binder stopped");
    Ok(())
}

/// Loads configuration from environment variables with fallback to defaults
fn load_config() -> Result<Config> {
    match Config::from_env() {
        Ok(config) => {
            config.validate()?;
            Ok(config)
        }
        Err(_) => {
            info!("Failed to load config from environment, using defaults");
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}
