//! HTTP catalog client.
//!
//! Uses `reqwest` for HTTP. Caches product details using `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rocket_shoes_core::ProductId;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;
use crate::models::{ProductDetails, Stock};

/// Client for the catalog/inventory REST API.
///
/// Cheaply cloneable; clones share the connection pool and product cache.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    products: Cache<ProductId, ProductDetails>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url: with_trailing_slash(config.api_url.clone()),
                api_token: config.api_token.clone(),
                products,
            }),
        })
    }

    /// Base URL endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve `{resource}/{id}` against the base URL.
    fn endpoint(&self, resource: &str, id: ProductId) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(&format!("{resource}/{id}"))?)
    }

    /// GET a JSON resource.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let mut request = self.inner.client.get(url.clone());
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }
}

impl Catalog for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<ProductDetails, CatalogError> {
        // Check cache
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: ProductDetails = self.get_json(self.endpoint("products", id)?).await?;

        // Cache the result
        self.inner.products.insert(id, product.clone()).await;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let stock: Stock = self.get_json(self.endpoint("stock", id)?).await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }
}

/// Ensure relative joins append to the base path instead of replacing its last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog(base: &str) -> HttpCatalog {
        HttpCatalog::new(&CatalogConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_from_host_root() {
        let catalog = catalog("http://localhost:3333");
        assert_eq!(
            catalog.endpoint("products", ProductId::new(1)).unwrap().as_str(),
            "http://localhost:3333/products/1"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let catalog = catalog("https://api.rocketshoes.test/v1");
        assert_eq!(catalog.base_url().as_str(), "https://api.rocketshoes.test/v1/");
        assert_eq!(
            catalog.endpoint("stock", ProductId::new(12)).unwrap().as_str(),
            "https://api.rocketshoes.test/v1/stock/12"
        );
    }
}
