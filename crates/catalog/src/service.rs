//! Catalog service contract (external collaborator).

use thiserror::Error;

use crate::product::Product;

/// Failure fetching the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),

    #[error("catalog response malformed: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Fetches products from wherever the host keeps them (HTTP, fixture, ...).
///
/// The core never calls this on its own; bootstrap does, then announces the
/// result on the bus as `products:loaded`.
pub trait CatalogGateway {
    fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}
