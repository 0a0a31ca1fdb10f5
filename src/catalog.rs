//! Product catalog: where snapshots come from at add-to-cart time.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::cart::{ProductId, ProductSnapshot};

/// Errors that can occur when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Product '{id}' is listed more than once")]
    DuplicateProduct { id: ProductId },

    #[error("Product '{id}' has a negative price")]
    NegativePrice { id: ProductId },
}

/// Supplies product snapshots by id.
pub trait Catalog {
    fn snapshot(&self, id: &ProductId) -> Option<ProductSnapshot>;
}

/// Fixed product list, typically loaded from a TOML file:
///
/// ```toml
/// [[products]]
/// id = "kettle"
/// title = "Electric Kettle"
/// price = 1200
/// original_price = 1499
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductSnapshot>,
    index: HashMap<ProductId, usize>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<ProductSnapshot>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<ProductSnapshot>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id.clone(),
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct {
                    id: product.id.clone(),
                });
            }
        }
        Ok(Self { products, index })
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::new(file.products)
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_toml_str(&content, path)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn products(&self) -> &[ProductSnapshot] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn snapshot(&self, id: &ProductId) -> Option<ProductSnapshot> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
            .cloned()
    }
}
