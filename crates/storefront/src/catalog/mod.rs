//! Remote catalog API client.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest` - the catalog is the source of truth,
//!   no local sync
//! - Every request is bounded by a client-wide timeout (10 seconds by
//!   default); a slow catalog degrades to "no data available", never blocks
//!   the cart
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use estore_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! let products = client.list_products().await?;
//! let categories = client.list_categories().await?;
//! let product = client.get_product(ProductId::new(1)).await?;
//! ```

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use estore_core::ProductId;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogConfig;
use cache::CacheValue;
use types::Product;

/// Cache TTL for catalog responses.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect error, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status code.
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the remote catalog API.
///
/// Provides typed access to products and categories. Responses are cached
/// for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Fetch and deserialize a JSON payload from the catalog.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.inner.base_url, path);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Get the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// List all products in the catalog.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get("products").await {
            tracing::debug!("cache hit for product list");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("/products").await?;
        let products = Arc::new(products);
        self.inner
            .cache
            .insert("products".to_string(), CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// List all category names.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Arc<Vec<String>>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get("categories").await
        {
            tracing::debug!("cache hit for category list");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get_json("/products/categories").await?;
        let categories = Arc::new(categories);
        self.inner
            .cache
            .insert(
                "categories".to_string(),
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;
        Ok(categories)
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the catalog has no product with
    /// the given ID. (The reference catalog answers unknown IDs with an empty
    /// body, which surfaces as a parse failure; both are treated as absence
    /// by callers.)
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Arc<Product>, CatalogError> {
        let key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            tracing::debug!(%id, "cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("/products/{id}")).await?;
        let product = Arc::new(product);
        self.inner
            .cache
            .insert(key, CacheValue::Product(Arc::clone(&product)))
            .await;
        Ok(product)
    }

    /// List products belonging to a single category.
    #[instrument(skip(self))]
    pub async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Arc<Vec<Product>>, CatalogError> {
        let key = format!("category:{category}");
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            tracing::debug!(category, "cache hit for category product list");
            return Ok(products);
        }

        let path = format!("/products/category/{}", urlencoding::encode(category));
        let products: Vec<Product> = self.get_json(&path).await?;
        let products = Arc::new(products);
        self.inner
            .cache
            .insert(key, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }
}
