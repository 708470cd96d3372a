//! # System Lifecycle
//!
//! Starts the store actor, wires every service to it, and shuts it down again.
//!
//! ## Wiring
//!
//! There is exactly one store actor. Each service receives its own clone of the store
//! client at construction, together with the collaborators it needs:
//!
//! | Service | Collaborators |
//! |---------|---------------|
//! | [`CatalogClient`](crate::catalog::CatalogClient) | store |
//! | [`InventoryLedger`](crate::inventory::InventoryLedger) | store |
//! | [`OrderService`](crate::orders::OrderService) | store, payment gateway, authorizer, currency |
//! | [`ReviewService`](crate::reviews::ReviewService) | store, authorizer |
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all services** - every store client goes with them
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs its summary** and the task finishes
//! 4. **Await completion** - a panicked actor task is reported as [`SystemError`]

pub mod bookstore_system;
pub mod error;

pub use bookstore_system::*;
pub use error::*;
