//! The immutable product set offered for a session.

use crate::types::{Price, ProductId};

/// A purchasable product.
///
/// Built once at startup by the catalog loader and never mutated. Cart lines
/// copy `name` and `price` at add time, so later catalog changes (there are
/// none within a session) would not rewrite an existing cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Path or URL of the product image.
    pub image: String,
}

/// Ordered collection of products, in catalog-document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an already-validated product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by ID. Linear scan; catalogs are a few dozen
    /// entries at most.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Product {
                id: ProductId::new(1),
                name: "Camiseta".to_string(),
                price: Price::from(20),
                image: "images/camiseta.jpg".to_string(),
            },
            Product {
                id: ProductId::new(2),
                name: "Pantalón".to_string(),
                price: Price::from(40),
                image: "images/pantalon.jpg".to_string(),
            },
        ])
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample();
        assert_eq!(catalog.get(ProductId::new(2)).map(|p| p.name.as_str()), Some("Pantalón"));
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_preserves_document_order() {
        let catalog = sample();
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Camiseta", "Pantalón"]);
    }

    #[test]
    fn test_empty() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
