//! Tiendita Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod persist;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// User-visible notice shown above the (empty) grid when the catalog could
/// not be loaded.
pub const CATALOG_UNAVAILABLE_NOTICE: &str =
    "Products are unavailable right now. Please try again later.";

/// Build the application router over the given state.
#[must_use]
pub fn app(state: AppState) -> Router {
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
