//! # Bookstore
//!
//! Order fulfillment and review bookkeeping for an online bookstore, on top of the
//! [`store_actor`] transactional table store.
//!
//! ## Core Components
//!
//! - **[model]**: Rows ([`Book`](model::Book), [`Order`](model::Order),
//!   [`OrderItem`](model::OrderItem), [`Review`](model::Review)) and request payloads.
//! - **[store]**: The [`BookstoreTables`](store::BookstoreTables) schema owned by one actor.
//! - **[orders]**: Checkout and payment confirmation.
//! - **[inventory]**: Advisory stock checks and the binding conditional decrement.
//! - **[reviews]**: Review CRUD with rating aggregates kept in step.
//! - **[catalog]**: Read access to books.
//! - **[auth]**, **[payment]**: The authorization and payment seams.
//! - **[lifecycle]**: Starts and stops the whole thing.
//!
//! ## Invariants
//!
//! After every committed transaction:
//! - `order.total == subtotal + tax + shipping_fee` and `subtotal == Σ price × amount`
//! - `book.inventory >= 0` (an unsigned column only ever lowered by a conditional write)
//! - `book.num_of_reviews` / `book.avg_rating` summarize exactly the book's reviews
//!
//! ## Testing
//!
//! See [`store_actor::mock`] for utilities to test services without spawning the actor.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod payment;
pub mod reviews;
pub mod store;

pub use error::ErrorKind;
pub use lifecycle::BookstoreSystem;
