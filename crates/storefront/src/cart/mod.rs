//! Cart subsystem: state machine, persistence, and wiring.
//!
//! # Architecture
//!
//! - [`aggregate`] - the in-memory state machine and its derived totals
//! - [`store`] - the durable file slot the cart survives restarts in
//! - [`bridge`] - write-through observer mirroring transitions to the store
//! - [`service`] - the mutex-guarded facade the route handlers call
//!
//! Data flow: at startup the store hydrates the aggregate once; afterwards
//! every user action becomes a transition on the aggregate, and the bridge
//! synchronously mirrors the resulting item sequence back to the store.

pub mod aggregate;
pub mod bridge;
pub mod service;
pub mod store;

pub use aggregate::{CartAggregate, CartSnapshot, LineItem, MAX_LINE_QUANTITY};
pub use bridge::{PersistenceBridge, TransitionObserver};
pub use service::CartService;
pub use store::{CartStore, StoreError};
