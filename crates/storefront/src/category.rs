//! Category filter state.
//!
//! A single selected category value, plus the pure projection that applies
//! it to a product collection. Selection is independent of the cart's
//! startup hydration; both fire once on mount.

use crate::catalog::types::Product;

/// The currently selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    /// Sentinel meaning "all categories".
    #[default]
    All,
    /// A specific category name as reported by the catalog.
    Category(String),
}

impl CategorySelection {
    /// Build a selection from an optional query parameter.
    ///
    /// Absent or empty values mean "all".
    #[must_use]
    pub fn from_param(param: Option<String>) -> Self {
        match param {
            Some(category) if !category.is_empty() => Self::Category(category),
            _ => Self::All,
        }
    }

    /// Replace the selection. `None` resets to "all".
    pub fn select(&mut self, category: Option<String>) {
        *self = Self::from_param(category);
    }

    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }

    /// Pure read-side projection of `products` through the filter.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    /// The selected category name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(category) => Some(category),
        }
    }
}
