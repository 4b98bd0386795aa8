//! `kiosk-catalog` — product value types and the catalog state holder.

pub mod product;
pub mod service;
pub mod state;

pub use product::{Category, Product};
pub use service::{CatalogError, CatalogGateway};
pub use state::CatalogState;
