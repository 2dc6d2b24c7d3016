/// Read-only product catalog
///
/// Loaded once at startup, either from the JSON document compiled into
/// the binary or from a user-supplied file. Never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::data::Product;

/// Catalog shipped with the application
const BUNDLED_CATALOG: &str = include_str!("../../assets/products.json");

/// Errors raised while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate product id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of product records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!("📦 Loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("❌ Bundled catalog is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct brands across the whole catalog, in order of first appearance
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|brand| seen.insert(*brand))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
