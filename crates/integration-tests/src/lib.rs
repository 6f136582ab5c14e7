//! Integration tests for Tiendita.
//!
//! Each test spawns the full storefront (router, state, persistence slot) on
//! an ephemeral port with a throwaway cart slot, then drives it over HTTP
//! with reqwest. The checkout delay is zeroed so tests run fast.
//!
//! Run with: `cargo test -p tiendita-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use tiendita_storefront::catalog::{self, CatalogSource};
use tiendita_storefront::config::StorefrontConfig;
use tiendita_storefront::state::AppState;

/// A running storefront instance plus the handles a test needs.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    /// Path of this instance's persisted cart slot.
    pub cart_path: PathBuf,
    _tmp: tempfile::TempDir,
}

/// Spawn a storefront over the built-in catalog on an ephemeral port.
///
/// # Panics
///
/// Panics if the listener cannot be bound; tests have no recovery path.
pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let cart_path = tmp.path().join("cart.json");

    let config = StorefrontConfig {
        host: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        cart_path: cart_path.clone(),
        catalog: CatalogSource::Builtin,
        checkout_delay: Duration::ZERO,
    };
    let state = AppState::new(config, catalog::builtin(), None);
    let app = tiendita_storefront::app(state);

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        cart_path,
        _tmp: tmp,
    }
}

impl TestApp {
    /// GET a path and return the response body.
    pub async fn get(&self, path: &str) -> String {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Request failed");
        assert!(resp.status().is_success(), "GET {path} -> {}", resp.status());
        resp.text().await.expect("Failed to read body")
    }

    /// POST a cart mutation with a product id and return the fragment body.
    pub async fn post_item(&self, path: &str, product_id: i32) -> String {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(&[("product_id", product_id.to_string())])
            .send()
            .await
            .expect("Request failed");
        assert!(resp.status().is_success(), "POST {path} -> {}", resp.status());
        resp.text().await.expect("Failed to read body")
    }

    /// POST a bodyless cart action (clear, checkout) and return the body.
    pub async fn post(&self, path: &str) -> String {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Request failed");
        assert!(resp.status().is_success(), "POST {path} -> {}", resp.status());
        resp.text().await.expect("Failed to read body")
    }
}
