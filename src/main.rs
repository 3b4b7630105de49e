//! KV Cache Manager - Standalone Host
//!
//! Loads the plugin into a bare router and serves it until Ctrl-C.

use axum::Router;
use log::{error, info};
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;

use kv_cache_manager::{HostConfig, KvCacheManager, LogObserver, Plugin};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match HostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let mut plugin = KvCacheManager::new(config.plugin.clone(), Arc::new(LogObserver));

    let routes = match plugin.init(Router::new()) {
        Ok(routes) => routes,
        Err(e) => {
            error!("Plugin cannot be initialized: {}", e);
            process::exit(1);
        }
    };

    // axum refuses to nest at the root
    let app = if config.route_prefix == "/" {
        Router::new().merge(routes)
    } else {
        Router::new().nest(&config.route_prefix, routes)
    };

    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address, e);
            process::exit(1);
        }
    };

    info!(
        "Serving {} on {} under {}",
        plugin.info().name,
        config.bind_address,
        config.route_prefix
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    plugin.exit();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
