//! # Catalog Crate
//!
//! Loads the static product catalog and answers read-only lookups on it.
//!
//! ## Main Components
//!
//! - **types**: `Product` and `Catalog`
//! - **loader**: Parse the JSON catalog file
//! - **index**: Validation, id index and lookups
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/products.json"))?;
//! let mouse = catalog.get(1).unwrap();
//! let electronics = catalog.by_category("electronics");
//! ```

pub mod error;
pub mod types;
pub mod loader;
pub mod index;

pub use error::{CatalogError, Result};
pub use types::{Catalog, Product, ProductId};
