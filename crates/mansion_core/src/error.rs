//! Catalog error types

use thiserror::Error;

/// Errors raised while loading a dish catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate dish id `{0}`")]
    DuplicateId(String),

    #[error("dish `{id}` has an invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
