//! Core domain types for the product catalog.
//!
//! Products are loaded once and never mutated, so everything downstream
//! either borrows them from the [`Catalog`] or clones the few it returns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique, stable identifier for a product
pub type ProductId = i64;

/// A single catalog entry.
///
/// Field names match the JSON catalog file and the HTTP responses, so the
/// same struct is used for loading and for serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Single category label, e.g. "Electronics"
    pub category: String,
    /// Non-negative price (validated at load time)
    pub price: f64,
    /// Ordered, set-like list of tags (required, may be empty)
    pub tags: Vec<String>,
}

/// The full, read-only product catalog.
///
/// Catalog order is significant: it is the tie-breaker for candidate ranking
/// and the order in which resolved recommendations are returned. The id index
/// maps each product id to its position in `products`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) products: Vec<Product>,
    pub(crate) id_index: HashMap<ProductId, usize>,
}
