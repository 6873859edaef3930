//! Catalog API response types.
//!
//! These mirror the JSON shapes returned by the remote catalog service. The
//! cart only reads a subset of [`Product`] fields at the moment an item is
//! added; everything else is display data for the rendering layer.

use estore_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price. The catalog serializes prices as JSON numbers.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// URI of the product image.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregated customer rating for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Numeric average, e.g. 4.3.
    pub rate: f64,
    /// Number of reviews the average is based on.
    pub count: u32,
}
