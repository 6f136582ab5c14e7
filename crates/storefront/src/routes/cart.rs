//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation returns the refreshed cart panel fragment plus an
//! `HX-Trigger: cart-updated` header; the count badge listens for that
//! trigger and re-fetches itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use tiendita_core::{Cart, CartLine, CheckoutOutcome, ClearOutcome, ProductId, RemoveOutcome};

use crate::error::Result;
use crate::state::AppState;

/// Feedback shown after adding a product.
pub const MSG_ITEM_ADDED: &str = "Product added to the cart.";
/// Feedback shown after removing a unit of a product.
pub const MSG_ITEM_REMOVED: &str = "Product removed.";
/// Feedback shown after emptying a non-empty cart.
pub const MSG_CART_CLEARED: &str = "Cart emptied.";
/// Informational message for clearing an already-empty cart.
pub const MSG_CART_ALREADY_EMPTY: &str = "The cart is already empty.";
/// Informational message for checking out an empty cart.
pub const MSG_NOTHING_TO_BUY: &str = "There is nothing in the cart to buy.";
/// Feedback shown after a completed simulated checkout.
pub const MSG_PURCHASE_COMPLETE: &str = "Purchase completed. Thank you!";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_price: line.subtotal().to_string(),
        }
    }
}

/// Add/remove form data; the only client-supplied value in the system.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: i32,
}

/// Cart panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub message: Option<String>,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Render the panel fragment with the `cart-updated` trigger attached.
fn panel_response(cart: &Cart, message: Option<&str>) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPanelTemplate {
            cart: CartView::from(cart),
            message: message.map(String::from),
        },
    )
        .into_response()
}

/// Display the cart panel (view-cart affordance).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Response> {
    let cart = state.cart()?;
    Ok(CartPanelTemplate {
        cart: CartView::from(&cart),
        message: None,
    }
    .into_response())
}

/// Add one unit of a product to the cart.
///
/// An ID not present in the catalog is a silent no-op: the UI only ever
/// offers valid IDs, so there is nothing useful to tell the visitor.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let Some(product) = state.catalog().get(id).cloned() else {
        tracing::debug!(product_id = %id, "add ignored: unknown product");
        let cart = state.cart()?;
        return Ok(panel_response(&cart, None));
    };

    let (quantity, cart) = state.update_cart(|cart| cart.add(&product))?;
    tracing::debug!(product_id = %id, quantity, "added to cart");
    Ok(panel_response(&cart, Some(MSG_ITEM_ADDED)))
}

/// Remove one unit of a product from the cart.
///
/// Decrements the line, deleting it when the quantity would reach zero. An
/// absent ID is a silent no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let (outcome, cart) = state.update_cart(|cart| cart.remove(id))?;

    let message = match outcome {
        RemoveOutcome::NotInCart => None,
        RemoveOutcome::Decremented(_) | RemoveOutcome::Removed => Some(MSG_ITEM_REMOVED),
    };
    Ok(panel_response(&cart, message))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    let (outcome, cart) = state.update_cart(Cart::clear)?;

    let message = match outcome {
        ClearOutcome::Cleared => MSG_CART_CLEARED,
        ClearOutcome::AlreadyEmpty => MSG_CART_ALREADY_EMPTY,
    };
    Ok(panel_response(&cart, Some(message)))
}

/// Simulated checkout.
///
/// Pauses for the configured "processing" delay (cosmetic only), then clears
/// the cart and confirms. An empty cart gets an informational message and no
/// mutation, so nothing is written to the slot either.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Response> {
    tokio::time::sleep(state.config().checkout_delay).await;

    let (outcome, cart) = state.update_cart(Cart::checkout)?;
    let message = match outcome {
        CheckoutOutcome::EmptyCart => MSG_NOTHING_TO_BUY.to_string(),
        CheckoutOutcome::Completed { total, item_count } => {
            tracing::info!(%total, item_count, "simulated checkout completed");
            MSG_PURCHASE_COMPLETE.to_string()
        }
    };
    Ok(panel_response(&cart, Some(message.as_str())))
}

/// Cart count badge fragment.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Response> {
    let cart = state.cart()?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tiendita_core::{Price, Product};

    fn two_line_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Camiseta".to_string(),
            price: Price::from(20),
            image: String::new(),
        });
        cart.add(&Product {
            id: ProductId::new(2),
            name: "Pantalón".to_string(),
            price: Price::from(40),
            image: String::new(),
        });
        cart
    }

    #[test]
    fn test_cart_view_formats_prices_to_two_decimals() {
        let mut cart = two_line_cart();
        // Second camiseta: line subtotal 40.00, cart total 80.00
        let camiseta = Product {
            id: ProductId::new(1),
            name: "Camiseta".to_string(),
            price: Price::from(20),
            image: String::new(),
        };
        cart.add(&camiseta);

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].price, "$20.00");
        assert_eq!(view.items[0].line_price, "$40.00");
        assert_eq!(view.total, "$80.00");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_panel_render_is_idempotent() {
        let cart = two_line_cart();
        let render = |message: Option<String>| {
            CartPanelTemplate {
                cart: CartView::from(&cart),
                message,
            }
            .render()
            .unwrap()
        };

        assert_eq!(render(None), render(None));
        assert_eq!(
            render(Some(MSG_ITEM_ADDED.to_string())),
            render(Some(MSG_ITEM_ADDED.to_string()))
        );
    }

    #[test]
    fn test_panel_shows_empty_indicator_without_lines() {
        let markup = CartPanelTemplate {
            cart: CartView::from(&Cart::new()),
            message: None,
        }
        .render()
        .unwrap();

        assert!(markup.contains("Your cart is empty"));
        assert!(!markup.contains("cart-line"));
    }

    #[test]
    fn test_panel_lists_lines_in_cart_order() {
        let markup = CartPanelTemplate {
            cart: CartView::from(&two_line_cart()),
            message: None,
        }
        .render()
        .unwrap();

        let camiseta = markup.find("Camiseta").unwrap();
        let pantalon = markup.find("Pantalón").unwrap();
        assert!(camiseta < pantalon);
        assert!(markup.contains("$60.00"));
    }

    #[test]
    fn test_count_badge_renders_quantity_sum() {
        let markup = CartCountTemplate { count: 7 }.render().unwrap();
        assert_eq!(markup.trim(), "7");
    }
}
