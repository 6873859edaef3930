//! End-to-end tests for the cart subsystem: aggregate transitions flowing
//! through the persistence bridge into the durable store, and hydration of
//! a fresh service from what a previous one wrote.

use estore_core::ProductId;
use estore_storefront::cart::{
    CartService, CartStore, LineItem, PersistenceBridge, TransitionObserver,
};
use estore_storefront::catalog::types::{Product, Rating};
use rust_decimal::Decimal;

fn product(id: i32, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price,
        description: String::new(),
        category: "test".to_string(),
        image: format!("https://example.com/{id}.jpg"),
        rating: Rating::default(),
    }
}

/// Build a cart service writing through to the store, like `AppState` does.
fn service_over(store: &CartStore) -> CartService {
    let mut service = CartService::new();
    service.register(Box::new(PersistenceBridge::new(store.clone())));
    service.hydrate(store.load());
    service
}

#[test]
fn cart_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CartStore::new(dir.path().join("cart.json"));

    // First session: put things in the cart.
    let service = service_over(&store);
    service.add_item(&product(1, Decimal::new(1000, 2)));
    service.add_item(&product(1, Decimal::new(1000, 2)));
    service.add_item(&product(2, Decimal::new(550, 2)));
    let before = service.snapshot();
    drop(service);

    // Second session: a fresh service hydrates from the same store.
    let service = service_over(&store);
    let after = service.snapshot();

    assert_eq!(after.items, before.items);
    assert_eq!(after.total, Decimal::new(2550, 2));
    assert_eq!(after.total_items, 3);
}

#[test]
fn every_mutation_is_written_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CartStore::new(dir.path().join("cart.json"));
    let service = service_over(&store);

    service.add_item(&product(1, Decimal::new(1000, 2)));
    assert_eq!(store.load().len(), 1);

    service.set_quantity(ProductId::new(1), 4);
    assert_eq!(store.load()[0].quantity, 4);

    service.remove_item(ProductId::new(1));
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_store_hydrates_to_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "[{\"id\": \"definitely not").expect("write corrupt payload");

    let store = CartStore::new(path);
    let service = service_over(&store);

    let snapshot = service.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total, Decimal::ZERO);
    assert_eq!(snapshot.total_items, 0);

    // The cart still works this session and repairs the stored payload.
    service.add_item(&product(1, Decimal::ONE));
    assert_eq!(store.load().len(), 1);
}

#[test]
fn persistence_failure_never_reaches_the_caller() {
    // Point the store at a path whose parent cannot be created (a file
    // stands where the directory should be).
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "not a directory").expect("write blocker file");

    let store = CartStore::new(blocker.join("cart.json"));
    let service = service_over(&store);

    // Mutations succeed in memory even though every write fails.
    let snapshot = service.add_item(&product(1, Decimal::new(1000, 2)));
    assert_eq!(snapshot.total_items, 1);
    assert!(store.load().is_empty());
}

#[test]
fn concurrent_transitions_keep_store_aligned_with_memory() {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    // Widens the window between a transition and its write-through; with
    // ordered notification the store still cannot fall behind the aggregate.
    struct SlowObserver;
    impl TransitionObserver for SlowObserver {
        fn on_transition(&self, _items: &[LineItem]) {
            thread::sleep(Duration::from_millis(25));
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let store = CartStore::new(dir.path().join("cart.json"));

    let mut service = CartService::new();
    service.register(Box::new(SlowObserver));
    service.register(Box::new(PersistenceBridge::new(store.clone())));
    service.hydrate(store.load());
    let service = Arc::new(service);

    let adder = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for id in 1..=4 {
                service.add_item(&product(id, Decimal::ONE));
            }
        })
    };
    let remover = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for id in 1..=4 {
                service.remove_item(ProductId::new(id));
            }
        })
    };
    adder.join().expect("adder thread");
    remover.join().expect("remover thread");

    // Whatever interleaving happened, the stored payload is a projection of
    // the final in-memory state.
    assert_eq!(store.load(), service.snapshot().items);
}

#[test]
fn clamp_applies_per_line_across_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CartStore::new(dir.path().join("cart.json"));

    let service = service_over(&store);
    let p = product(2, Decimal::new(550, 2));
    for _ in 0..4 {
        service.add_item(&p);
    }
    drop(service);

    // Hydrated quantity counts toward the ceiling on further adds.
    let service = service_over(&store);
    service.add_item(&p);
    let snapshot = service.add_item(&p);

    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].quantity, 5);
    assert_eq!(snapshot.total, Decimal::new(2750, 2));
}
