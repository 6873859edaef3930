//! Cache types for catalog API responses.

use std::sync::Arc;

use super::types::Product;

/// Cached value types.
///
/// Payloads are wrapped in `Arc` so cache hits are cheap to clone.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Arc<Product>),
    Products(Arc<Vec<Product>>),
    Categories(Arc<Vec<String>>),
}
