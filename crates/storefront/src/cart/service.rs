//! Cart entry points used by the rendering layer.
//!
//! [`CartService`] owns the aggregate behind a mutex and the registered
//! transition observers. All mutation funnels through [`CartService::transition`]:
//! lock, apply the aggregate operation, notify observers with the
//! post-transition item sequence, then release. Observers run while the lock
//! is still held so they see snapshots in transition order; all observer work
//! is synchronous and no `.await` happens under the lock.

use std::sync::{Mutex, PoisonError};

use estore_core::ProductId;

use super::aggregate::{CartAggregate, CartSnapshot, LineItem};
use super::bridge::TransitionObserver;
use crate::catalog::types::Product;

/// Thread-safe facade over the cart aggregate.
#[derive(Default)]
pub struct CartService {
    aggregate: Mutex<CartAggregate>,
    observers: Vec<Box<dyn TransitionObserver>>,
}

impl CartService {
    /// Create a service with an empty cart and no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer notified after every accepted transition.
    ///
    /// Observers are invoked in registration order.
    pub fn register(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    /// Add one unit of `product` to the cart.
    pub fn add_item(&self, product: &Product) -> CartSnapshot {
        self.transition(|cart| cart.add_item(product))
    }

    /// Remove the line with the given product ID.
    pub fn remove_item(&self, id: ProductId) -> CartSnapshot {
        self.transition(|cart| cart.remove_item(id))
    }

    /// Set the quantity of the line with the given product ID.
    pub fn set_quantity(&self, id: ProductId, quantity: i64) -> CartSnapshot {
        self.transition(|cart| cart.set_quantity(id, quantity))
    }

    /// Replace the cart contents wholesale (startup hydration).
    pub fn hydrate(&self, items: Vec<LineItem>) -> CartSnapshot {
        self.transition(|cart| cart.hydrate(items))
    }

    /// Current cart contents and totals, without a transition.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.lock().snapshot()
    }

    /// Apply one aggregate transition and notify observers with the result.
    ///
    /// The lock is held across notification so concurrent transitions cannot
    /// reach observers out of order; a write-through observer therefore
    /// always leaves durable storage holding the latest accepted state.
    fn transition<F>(&self, op: F) -> CartSnapshot
    where
        F: FnOnce(&mut CartAggregate) -> CartSnapshot,
    {
        let mut cart = self.lock();
        let snapshot = op(&mut cart);
        for observer in &self.observers {
            observer.on_transition(&snapshot.items);
        }
        drop(cart);
        snapshot
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CartAggregate> {
        // A poisoned lock only means another handler panicked mid-transition;
        // the aggregate itself is still structurally valid.
        self.aggregate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
