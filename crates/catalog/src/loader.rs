//! Loader for the JSON catalog file.
//!
//! Format: a single JSON array of product records
//!
//! ```json
//! [{"id": 1, "name": "Wireless Mouse", "description": "...",
//!   "category": "Electronics", "price": 25.0, "tags": ["wireless", "mouse"]}]
//! ```

use crate::error::{CatalogError, Result};
use crate::types::Product;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a catalog file into product records.
///
/// No validation happens here; see [`Catalog::from_products`](crate::Catalog::from_products).
pub fn read_products(path: &Path) -> Result<Vec<Product>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    parse_products(&content, &path.display().to_string())
}

/// Parse catalog JSON text.
///
/// `source` is only used to label parse errors.
pub fn parse_products(content: &str, source: &str) -> Result<Vec<Product>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: source.to_string(),
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })
}
