//! Write-through synchronization between the cart and durable storage.

use super::aggregate::LineItem;
use super::store::CartStore;

/// Observer of accepted cart transitions.
///
/// Implementations receive the immutable post-transition item sequence,
/// once per accepted transition. Observers must not fail the transition
/// that triggered them.
pub trait TransitionObserver: Send + Sync {
    /// Called after a transition with the resulting item sequence.
    fn on_transition(&self, items: &[LineItem]);
}

/// Mirrors every accepted transition into the [`CartStore`].
///
/// Persistence is fire-and-forget: a failed write degrades to "cart works
/// this session, may not survive restart" and is logged inside the store,
/// never raised to the caller of the triggering cart operation.
#[derive(Debug)]
pub struct PersistenceBridge {
    store: CartStore,
}

impl PersistenceBridge {
    /// Create a bridge writing through to `store`.
    #[must_use]
    pub const fn new(store: CartStore) -> Self {
        Self { store }
    }
}

impl TransitionObserver for PersistenceBridge {
    fn on_transition(&self, items: &[LineItem]) {
        self.store.save(items);
    }
}
