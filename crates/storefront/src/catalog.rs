//! Catalog loading.
//!
//! The catalog is loaded once at startup from one of three sources: the
//! built-in seed, a JSON document on disk, or a JSON document fetched over
//! HTTP (the only network-bound operation in the system). A load failure is
//! recovered by the caller with an empty catalog and a page notice; it is
//! never retried.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use tiendita_core::{Catalog, Price, Product, ProductId};

/// Where the product catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The built-in three-product demo catalog.
    Builtin,
    /// A JSON document on disk.
    File(PathBuf),
    /// A JSON document fetched over HTTP.
    Url(Url),
}

impl CatalogSource {
    /// Parse a source from its configuration string: `builtin`, an
    /// `http(s)://` URL, or a file path.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the value looks like a URL but does not
    /// parse as one.
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        if value.eq_ignore_ascii_case("builtin") {
            Ok(Self::Builtin)
        } else if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Url(Url::parse(value)?))
        } else {
            Ok(Self::File(PathBuf::from(value)))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Catalog loading failed. Recovered by the caller, never fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("catalog read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One record of the external catalog document.
///
/// `price` is a JSON number in the document; it is parsed into a decimal
/// here so no float ever reaches the domain model.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: i32,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    image: String,
}

/// Load the catalog from the configured source.
///
/// # Errors
///
/// Returns [`CatalogError`] if the document cannot be fetched, read, or
/// parsed. Individual malformed records (negative price, duplicate ID) are
/// skipped with a warning instead of failing the whole load.
pub async fn load(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    match source {
        CatalogSource::Builtin => Ok(builtin()),
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            parse_document(&bytes)
        }
        CatalogSource::Url(url) => {
            let records = reqwest::get(url.as_str())
                .await?
                .error_for_status()?
                .json::<Vec<CatalogRecord>>()
                .await?;
            Ok(build_catalog(records))
        }
    }
}

/// Parse a catalog document from raw JSON bytes.
fn parse_document(bytes: &[u8]) -> Result<Catalog, CatalogError> {
    let records: Vec<CatalogRecord> = serde_json::from_slice(bytes)?;
    Ok(build_catalog(records))
}

/// Build a catalog from parsed records, skipping ones that would violate
/// domain invariants.
fn build_catalog(records: Vec<CatalogRecord>) -> Catalog {
    let mut products: Vec<Product> = Vec::with_capacity(records.len());
    for record in records {
        let id = ProductId::new(record.id);
        let price = Price::new(record.price);
        if price.is_negative() {
            tracing::warn!(product_id = %id, "skipping catalog record with negative price");
            continue;
        }
        if products.iter().any(|p| p.id == id) {
            tracing::warn!(product_id = %id, "skipping catalog record with duplicate id");
            continue;
        }
        products.push(Product {
            id,
            name: record.name,
            price,
            image: record.image,
        });
    }
    Catalog::new(products)
}

/// The built-in demo catalog.
#[must_use]
pub fn builtin() -> Catalog {
    Catalog::new(vec![
        Product {
            id: ProductId::new(1),
            name: "Camiseta".to_string(),
            price: Price::from(20),
            image: "/static/images/camiseta.jpg".to_string(),
        },
        Product {
            id: ProductId::new(2),
            name: "Pantalón".to_string(),
            price: Price::from(40),
            image: "/static/images/pantalon.jpg".to_string(),
        },
        Product {
            id: ProductId::new(3),
            name: "Zapatos".to_string(),
            price: Price::from(60),
            image: "/static/images/zapatos.jpg".to_string(),
        },
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_builtin() {
        assert_eq!(CatalogSource::parse("builtin").unwrap(), CatalogSource::Builtin);
        assert_eq!(CatalogSource::parse("Builtin").unwrap(), CatalogSource::Builtin);
    }

    #[test]
    fn test_source_parse_url() {
        let source = CatalogSource::parse("https://example.com/catalog.json").unwrap();
        assert!(matches!(source, CatalogSource::Url(_)));
    }

    #[test]
    fn test_source_parse_invalid_url() {
        assert!(CatalogSource::parse("http://").is_err());
    }

    #[test]
    fn test_source_parse_path() {
        let source = CatalogSource::parse("content/catalog.json").unwrap();
        assert_eq!(source, CatalogSource::File(PathBuf::from("content/catalog.json")));
    }

    #[test]
    fn test_parse_well_formed_document() {
        let doc = r#"[
            {"id": 1, "name": "Camiseta", "price": 20, "image": "imagenes/remera.jpg"},
            {"id": 2, "name": "Pantalón", "price": 40.5, "image": "imagenes/pantalon.jpeg"}
        ]"#
        .as_bytes();
        let catalog = parse_document(doc).unwrap();
        assert_eq!(catalog.len(), 2);
        let pantalon = catalog.get(ProductId::new(2)).unwrap();
        assert_eq!(pantalon.price.to_string(), "$40.50");
    }

    #[test]
    fn test_parse_allows_missing_image() {
        let doc = br#"[{"id": 1, "name": "Camiseta", "price": 20}]"#;
        let catalog = parse_document(doc).unwrap();
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().image, "");
    }

    #[test]
    fn test_negative_price_record_is_skipped() {
        let doc = r#"[
            {"id": 1, "name": "Camiseta", "price": -5, "image": ""},
            {"id": 2, "name": "Pantalón", "price": 40, "image": ""}
        ]"#
        .as_bytes();
        let catalog = parse_document(doc).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first_record() {
        let doc = br#"[
            {"id": 1, "name": "Camiseta", "price": 20, "image": ""},
            {"id": 1, "name": "Otra", "price": 99, "image": ""}
        ]"#;
        let catalog = parse_document(doc).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "Camiseta");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            parse_document(b"{\"not\": \"a list\"}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "Camiseta");
        assert_eq!(catalog.get(ProductId::new(3)).unwrap().price, Price::from(60));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/catalog.json"));
        assert!(matches!(load(&source).await, Err(CatalogError::Read(_))));
    }
}
