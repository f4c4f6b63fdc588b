//! Error types for the catalog crate.
//!
//! Every way a catalog load can fail has its own variant so the binaries can
//! report exactly which file or record was at fault.

use thiserror::Error;

use crate::types::ProductId;

/// Errors that can occur while loading or validating the product catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not a JSON array of product records
    ///
    /// Line and column come straight from serde_json so the offending record
    /// can be found without re-reading the file by hand.
    #[error("Parse error at line {line}, column {column} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// Two records share the same product id
    #[error("Duplicate product id {id}")]
    DuplicateId { id: ProductId },

    /// A product field had an invalid value
    #[error("Invalid value for {field} of product {id}: {value}")]
    InvalidValue {
        id: ProductId,
        field: String,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
