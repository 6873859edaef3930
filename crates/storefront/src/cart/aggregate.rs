//! In-memory cart state machine.
//!
//! [`CartAggregate`] is the single authority for current cart contents.
//! Every mutating operation is a discrete, synchronous transition that ends
//! by recomputing the derived totals as a full fold over the item sequence -
//! totals are never patched incrementally, so they cannot drift.

use estore_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::types::Product;

/// Ceiling for a line's quantity on the add path.
///
/// Repeated adds clamp here; `set_quantity` intentionally does not (the
/// quantity control in the UI offers 1..=5, matching this limit).
pub const MAX_LINE_QUANTITY: u32 = 5;

/// One product's entry in the cart.
///
/// Title, price, and image are snapshots taken at add-time; later catalog
/// changes do not retroactively alter a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
}

impl LineItem {
    /// Create a line item from a product snapshot with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Immutable view of the cart after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of unit price times quantity over all items.
    pub total: Decimal,
    /// Sum of quantities over all items.
    pub total_items: u32,
}

impl CartSnapshot {
    /// An empty cart snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            total_items: 0,
        }
    }
}

/// The in-memory cart: an ordered sequence of line items plus derived totals.
#[derive(Debug, Default)]
pub struct CartAggregate {
    items: Vec<LineItem>,
    total: Decimal,
    total_items: u32,
}

impl CartAggregate {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line for this product exists, its quantity is incremented,
    /// clamped to [`MAX_LINE_QUANTITY`]. Adding beyond the clamp is a valid
    /// call that leaves the quantity unchanged. Otherwise a new line is
    /// created with quantity 1 from a snapshot of the product.
    pub fn add_item(&mut self, product: &Product) -> CartSnapshot {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
        } else {
            self.items.push(LineItem::from_product(product));
        }
        self.recompute_totals();
        self.snapshot()
    }

    /// Remove the line with the given product ID. Absence is a no-op.
    pub fn remove_item(&mut self, id: ProductId) -> CartSnapshot {
        self.items.retain(|item| item.id != id);
        self.recompute_totals();
        self.snapshot()
    }

    /// Set the quantity of the line with the given product ID.
    ///
    /// Absence is a no-op. A quantity of zero or less removes the line
    /// entirely. Values above [`MAX_LINE_QUANTITY`] are stored as given:
    /// only the add path clamps.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> CartSnapshot {
        if self.items.iter().any(|item| item.id == id) {
            if quantity <= 0 {
                self.items.retain(|item| item.id != id);
            } else if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
        self.recompute_totals();
        self.snapshot()
    }

    /// Replace the entire item sequence with `items` (startup hydration).
    ///
    /// Prior state is discarded wholesale; nothing is merged.
    pub fn hydrate(&mut self, items: Vec<LineItem>) -> CartSnapshot {
        self.items = items;
        self.recompute_totals();
        self.snapshot()
    }

    /// Current items and totals. Side-effect-free.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total,
            total_items: self.total_items,
        }
    }

    /// Recompute both derived totals as a fold over the current items.
    ///
    /// The item count saturates; `set_quantity` does not bound quantities,
    /// so the sum of lines can exceed `u32::MAX`.
    fn recompute_totals(&mut self) {
        self.total_items = self
            .items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity));
        self.total = self.items.iter().map(LineItem::line_total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            description: String::new(),
            category: "test".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            rating: crate::catalog::types::Rating::default(),
        }
    }

    fn assert_totals_consistent(snapshot: &CartSnapshot) {
        let expected_total: Decimal = snapshot.items.iter().map(LineItem::line_total).sum();
        let expected_count: u32 = snapshot.items.iter().map(|item| item.quantity).sum();
        assert_eq!(snapshot.total, expected_total);
        assert_eq!(snapshot.total_items, expected_count);
    }

    #[test]
    fn test_add_item_creates_line_with_quantity_one() {
        let mut cart = CartAggregate::new();
        let snapshot = cart.add_item(&product(1, Decimal::new(1000, 2)));

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 1);
        assert_eq!(snapshot.total, Decimal::new(1000, 2));
        assert_eq!(snapshot.total_items, 1);
    }

    #[test]
    fn test_add_item_merges_into_existing_line() {
        let mut cart = CartAggregate::new();
        let p = product(1, Decimal::new(1000, 2));
        cart.add_item(&p);
        let snapshot = cart.add_item(&p);

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(snapshot.total, Decimal::new(2000, 2));
        assert_eq!(snapshot.total_items, 2);
    }

    #[test]
    fn test_add_item_clamps_at_max_quantity() {
        let mut cart = CartAggregate::new();
        let p = product(2, Decimal::new(550, 2));
        let mut snapshot = CartSnapshot::empty();
        for _ in 0..6 {
            snapshot = cart.add_item(&p);
            assert_totals_consistent(&snapshot);
        }

        assert_eq!(snapshot.items[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(snapshot.total, Decimal::new(2750, 2));
        assert_eq!(snapshot.total_items, 5);
    }

    #[test]
    fn test_add_quantity_is_min_of_calls_and_ceiling() {
        for calls in 1..=8 {
            let mut cart = CartAggregate::new();
            let p = product(7, Decimal::ONE);
            let mut quantity = 0;
            for _ in 0..calls {
                quantity = cart.add_item(&p).items[0].quantity;
            }
            assert_eq!(quantity, calls.min(MAX_LINE_QUANTITY));
        }
    }

    #[test]
    fn test_add_item_snapshots_product_fields() {
        let mut cart = CartAggregate::new();
        let p = product(3, Decimal::new(999, 2));
        let snapshot = cart.add_item(&p);

        let item = &snapshot.items[0];
        assert_eq!(item.id, p.id);
        assert_eq!(item.title, p.title);
        assert_eq!(item.price, p.price);
        assert_eq!(item.image, p.image);
    }

    #[test]
    fn test_remove_item_deletes_line() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        cart.add_item(&product(2, Decimal::TWO));
        let snapshot = cart.remove_item(ProductId::new(1));

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, ProductId::new(2));
        assert_totals_consistent(&snapshot);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        let snapshot = cart.remove_item(ProductId::new(99));

        assert_eq!(snapshot.items.len(), 1);
        assert_totals_consistent(&snapshot);
    }

    #[test]
    fn test_set_quantity_updates_totals() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::new(250, 2)));
        let snapshot = cart.set_quantity(ProductId::new(1), 4);

        assert_eq!(snapshot.items[0].quantity, 4);
        assert_eq!(snapshot.total, Decimal::new(1000, 2));
        assert_eq!(snapshot.total_items, 4);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = CartAggregate::new();
        let p = product(1, Decimal::new(1000, 2));
        cart.add_item(&p);
        cart.add_item(&p);
        let snapshot = cart.set_quantity(ProductId::new(1), 0);

        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.total, Decimal::ZERO);
        assert_eq!(snapshot.total_items, 0);
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        let snapshot = cart.set_quantity(ProductId::new(1), -3);

        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_matches_remove_item() {
        let build = || {
            let mut cart = CartAggregate::new();
            cart.add_item(&product(1, Decimal::ONE));
            cart.add_item(&product(2, Decimal::TWO));
            cart.add_item(&product(2, Decimal::TWO));
            cart
        };

        let mut by_set = build();
        let mut by_remove = build();
        let a = by_set.set_quantity(ProductId::new(2), 0);
        let b = by_remove.remove_item(ProductId::new(2));

        assert_eq!(a.items, b.items);
        assert_eq!(a.total, b.total);
        assert_eq!(a.total_items, b.total_items);
    }

    #[test]
    fn test_set_quantity_absent_id_is_noop() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        let snapshot = cart.set_quantity(ProductId::new(42), 3);

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_does_not_clamp_above_ceiling() {
        // The upper bound is only enforced on the add path; a direct
        // quantity update stores the value as given.
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        let snapshot = cart.set_quantity(ProductId::new(1), 9);

        assert_eq!(snapshot.items[0].quantity, 9);
        assert_eq!(snapshot.total_items, 9);
    }

    #[test]
    fn test_add_item_after_huge_set_quantity_clamps() {
        // set_quantity stores unbounded values; a later add must clamp back
        // into range instead of overflowing.
        let mut cart = CartAggregate::new();
        let p = product(1, Decimal::ZERO);
        cart.add_item(&p);
        cart.set_quantity(ProductId::new(1), i64::from(u32::MAX));
        let snapshot = cart.add_item(&p);

        assert_eq!(snapshot.items[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(snapshot.total_items, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_total_items_saturates_instead_of_overflowing() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ZERO));
        cart.add_item(&product(2, Decimal::ZERO));
        cart.set_quantity(ProductId::new(1), i64::from(u32::MAX));
        let snapshot = cart.set_quantity(ProductId::new(2), i64::from(u32::MAX));

        assert_eq!(snapshot.total_items, u32::MAX);
    }

    #[test]
    fn test_hydrate_replaces_state_wholesale() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));

        let restored = vec![
            LineItem {
                id: ProductId::new(10),
                title: "Restored".to_string(),
                price: Decimal::new(300, 2),
                quantity: 2,
                image: String::new(),
            },
            LineItem {
                id: ProductId::new(11),
                title: "Also restored".to_string(),
                price: Decimal::new(150, 2),
                quantity: 1,
                image: String::new(),
            },
        ];

        let snapshot = cart.hydrate(restored.clone());
        assert_eq!(snapshot.items, restored);
        assert_eq!(snapshot.total, Decimal::new(750, 2));
        assert_eq!(snapshot.total_items, 3);

        // snapshot() afterwards returns exactly the hydrated state
        assert_eq!(cart.snapshot(), snapshot);
    }

    #[test]
    fn test_hydrate_with_empty_clears_cart() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(1, Decimal::ONE));
        let snapshot = cart.hydrate(Vec::new());

        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.total, Decimal::ZERO);
        assert_eq!(snapshot.total_items, 0);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut cart = CartAggregate::new();
        cart.add_item(&product(3, Decimal::ONE));
        cart.add_item(&product(1, Decimal::ONE));
        cart.add_item(&product(2, Decimal::ONE));
        // Merging into an existing line must not reorder it.
        let snapshot = cart.add_item(&product(1, Decimal::ONE));

        let ids: Vec<i32> = snapshot.items.iter().map(|item| item.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_scenario_add_twice_then_clear() {
        let mut cart = CartAggregate::new();
        let p = product(1, Decimal::new(1000, 2));
        cart.add_item(&p);
        let snapshot = cart.add_item(&p);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(snapshot.total, Decimal::new(2000, 2));
        assert_eq!(snapshot.total_items, 2);

        let snapshot = cart.set_quantity(ProductId::new(1), 0);
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.total, Decimal::ZERO);
        assert_eq!(snapshot.total_items, 0);
    }
}
