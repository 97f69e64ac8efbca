//! Catalog and inventory API access.
//!
//! # Endpoints
//!
//! - `GET products/{id}` - Product details (title, price, image)
//! - `GET stock/{id}` - Units available for sale
//!
//! Product details change rarely and are cached by [`HttpCatalog`]; stock is
//! always fetched live so quantity checks see current inventory.

mod http;

pub use http::HttpCatalog;

use std::future::Future;
use std::sync::Arc;

use rocket_shoes_core::ProductId;
use thiserror::Error;

use crate::models::{ProductDetails, Stock};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Read access to product details and stock.
pub trait Catalog: Send + Sync {
    /// Fetch product details by id.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductDetails, CatalogError>> + Send;

    /// Fetch current stock by id.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send;
}

impl<C: Catalog> Catalog for Arc<C> {
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductDetails, CatalogError>> + Send {
        (**self).product(id)
    }

    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).stock(id)
    }
}
