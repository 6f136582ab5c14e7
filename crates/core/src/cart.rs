//! The cart and its reconciliation rules.
//!
//! A cart is an ordered list of lines, one per product, in first-add order.
//! Invariants:
//!
//! - at most one line per product ID
//! - every line has `quantity >= 1`; a line that would reach zero is removed
//! - `total` and `item_count` are always recomputed from the lines, never
//!   stored, so they cannot drift
//!
//! The cart knows nothing about persistence or rendering. Callers mutate it
//! through the operations below and react to the returned outcome (persist,
//! re-render, show a message).

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product's aggregated quantity within the cart.
///
/// `name` and `price` are copied from the product at add time and never
/// re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price * self.quantity
    }
}

/// Result of removing one unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No line for that product; the cart is unchanged.
    NotInCart,
    /// The line's quantity was decremented to the given value.
    Decremented(u32),
    /// The line held a single unit and was deleted.
    Removed,
}

/// Result of emptying the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    /// Nothing to do; callers show a distinct message for this.
    AlreadyEmpty,
}

/// Result of the simulated checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to buy; the cart is unchanged.
    EmptyCart,
    /// The purchase "went through" and the cart was cleared.
    Completed { total: Price, item_count: u32 },
}

/// Ordered collection of cart lines, insertion order = first-add order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from a persisted snapshot, normalizing it.
    ///
    /// The persisted slot carries no version field, so this is where a stale
    /// or hand-edited snapshot gets repaired rather than producing undefined
    /// renderer behavior: zero-quantity lines are dropped, and duplicate
    /// product IDs are merged into the first occurrence (summing quantities,
    /// keeping the first line's name and price).
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.find_mut(line.product_id) {
                Some(existing) => existing.quantity += line.quantity,
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// All lines, in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total unit quantity across all lines (the count badge value).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add one unit of a product, returning the line's new quantity.
    ///
    /// Increments an existing line, or appends a new one with quantity 1,
    /// copying the product's current name and price. Catalog lookup is the
    /// caller's job; an unknown ID never reaches this method.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.find_mut(product.id) {
            line.quantity += 1;
            return line.quantity;
        }
        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        });
        1
    }

    /// Remove one unit of a product.
    ///
    /// Decrements the line's quantity, deleting the line when it would reach
    /// zero. An absent ID leaves the cart unchanged.
    pub fn remove(&mut self, id: ProductId) -> RemoveOutcome {
        let Some(index) = self.lines.iter().position(|line| line.product_id == id) else {
            return RemoveOutcome::NotInCart;
        };
        let Some(line) = self.lines.get_mut(index) else {
            return RemoveOutcome::NotInCart;
        };
        if line.quantity > 1 {
            line.quantity -= 1;
            RemoveOutcome::Decremented(line.quantity)
        } else {
            self.lines.remove(index);
            RemoveOutcome::Removed
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) -> ClearOutcome {
        if self.lines.is_empty() {
            ClearOutcome::AlreadyEmpty
        } else {
            self.lines.clear();
            ClearOutcome::Cleared
        }
    }

    /// Simulated checkout: report the totals, then clear.
    ///
    /// No payment call, no partial-failure path. An empty cart is reported
    /// as [`CheckoutOutcome::EmptyCart`] without mutating anything.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.lines.is_empty() {
            return CheckoutOutcome::EmptyCart;
        }
        let outcome = CheckoutOutcome::Completed {
            total: self.total(),
            item_count: self.item_count(),
        };
        self.lines.clear();
        outcome
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == id)
    }
}
