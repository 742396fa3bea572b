//! Read-only product catalog: feed records and the cached fetch client.

pub mod client;
pub mod product;

pub use client::CatalogClient;
pub use product::{Product, StyleVariant, STOCK_AVAILABLE};
