//! Tiendita Storefront - server-rendered shop page and cart widget.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for cart interactivity
//! - Askama templates for server-side rendering
//! - Catalog loaded once at startup (built-in seed, file, or URL)
//! - Cart state held in memory, mirrored to a single JSON slot on disk
//!   after every mutation

#![cfg_attr(not(test), forbid(unsafe_code))]

use tiendita_core::Catalog;
use tiendita_storefront::config::StorefrontConfig;
use tiendita_storefront::state::AppState;
use tiendita_storefront::{CATALOG_UNAVAILABLE_NOTICE, app, catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tiendita_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load the catalog once. A failure is not fatal: the grid renders empty
    // with a notice, and the cart keeps working.
    let (catalog, notice) = match catalog::load(&config.catalog).await {
        Ok(catalog) => {
            tracing::info!(source = %config.catalog, products = catalog.len(), "catalog loaded");
            (catalog, None)
        }
        Err(e) => {
            tracing::warn!(source = %config.catalog, error = %e, "catalog load failed");
            (Catalog::default(), Some(CATALOG_UNAVAILABLE_NOTICE.to_string()))
        }
    };

    // Build application state; restores any persisted cart snapshot
    let state = AppState::new(config.clone(), catalog, notice);

    let app = app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
