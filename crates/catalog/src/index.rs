//! Catalog construction, validation and lookups.
//!
//! The catalog is built once at startup and then only read, so it is shared
//! as `Arc<Catalog>` without any locking.

use crate::error::{CatalogError, Result};
use crate::loader;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from a JSON file.
    ///
    /// Steps:
    /// 1. Parse the file into product records
    /// 2. Validate every record
    /// 3. Build the id index
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading product catalog from {:?}", path);

        let products = loader::read_products(path)?;
        let catalog = Self::from_products(products)?;

        info!(
            "Loaded {} products in {} categories",
            catalog.len(),
            catalog.categories().len()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed products, keeping their order.
    ///
    /// Fails on duplicate ids and on negative or non-finite prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        let mut id_index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            validate_product(product)?;
            if id_index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId { id: product.id });
            }
        }

        Ok(Self { products, id_index })
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.id_index.get(&id).map(|&position| &self.products[position])
    }

    /// Products whose category equals `category`, ignoring case.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        let wanted = category.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect()
    }

    /// Distinct category labels in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Map a list of ids back to catalog products.
    ///
    /// The result follows catalog order, not the order of `ids`. Unknown ids
    /// are dropped and repeated ids only yield the product once.
    pub fn resolve_ids(&self, ids: &[ProductId]) -> Vec<&Product> {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        self.products
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate_product(product: &Product) -> Result<()> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(CatalogError::InvalidValue {
            id: product.id,
            field: "price".to_string(),
            value: product.price.to_string(),
        });
    }
    Ok(())
}
