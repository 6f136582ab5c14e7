//! Shop page route handler.
//!
//! The single full page: product grid, cart panel, and count badge. All
//! later interaction happens through the fragment endpoints in
//! [`super::cart`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use tiendita_core::Product;

use crate::error::Result;
use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    /// Products in catalog order.
    pub products: Vec<ProductCardView>,
    /// Current cart, for the panel and the count badge.
    pub cart: CartView,
    /// Cart feedback message (always empty on a full page load).
    pub message: Option<String>,
    /// Catalog-failure notice, shown above an empty grid.
    pub notice: Option<String>,
}

/// Display the shop page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cart = state.cart()?;

    Ok(ShopTemplate {
        products: state.catalog().products().iter().map(ProductCardView::from).collect(),
        cart: CartView::from(&cart),
        message: None,
        notice: state.catalog_notice().map(String::from),
    })
}
