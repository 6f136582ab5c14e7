//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Shop page (product grid + cart panel)
//! GET  /health         - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart           - Cart panel fragment (view cart)
//! POST /cart/add       - Add one unit (returns cart_panel fragment)
//! POST /cart/remove    - Remove one unit (returns cart_panel fragment)
//! POST /cart/clear     - Empty the cart (returns cart_panel fragment)
//! POST /cart/checkout  - Simulated checkout (returns cart_panel fragment)
//! GET  /cart/count     - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .nest("/cart", cart_routes())
}
