//! # Store Actor
//!
//! This crate provides a transactional, in-memory table store that lives inside a single
//! Tokio task. It combines the **Actor Model** with an **undo journal** so that any number
//! of concurrent callers get all-or-nothing transactions without sharing a lock.
//!
//! ## Why an Actor?
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within the actor makes every transaction serializable
//!
//! A caller ships a closure; the actor runs it against its tables, commits if it returned
//! `Ok`, rolls back if it returned `Err` (or panicked), and only then answers.
//!
//! ## Architecture Overview
//!
//! 1. **Row Layer** ([`Record`], [`Table`]) - typed rows, id sequence, unique key, journal
//! 2. **Schema Layer** ([`Schema`]) - the set of tables that commit and roll back together
//! 3. **Runtime Layer** ([`StoreActor`]) - message processing and transaction settlement
//! 4. **Interface Layer** ([`StoreClient`], [`ActorClient`]) - type-safe access for services
//!
//! ## Example
//!
//! ```rust
//! use store_actor::{Record, Schema, StoreActor, StoreError, Table};
//!
//! #[derive(Clone, Debug)]
//! struct Ticket { id: u32, seats_left: u32 }
//!
//! impl Record for Ticket {
//!     type Id = u32;
//!     type Draft = u32;
//!     const TABLE: &'static str = "tickets";
//!     fn from_draft(id: u32, seats_left: u32) -> Self { Self { id, seats_left } }
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! #[derive(Default)]
//! struct BoxOffice { tickets: Table<Ticket> }
//!
//! impl Schema for BoxOffice {
//!     fn commit(&mut self) { self.tickets.commit(); }
//!     fn rollback(&mut self) { self.tickets.rollback(); }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(16, BoxOffice::default());
//!     tokio::spawn(actor.run());
//!
//!     let ticket = client
//!         .transact("issue", |db: &mut BoxOffice| db.tickets.insert(1))
//!         .await
//!         .unwrap()
//!         .unwrap();
//!
//!     // Conditional write: only take a seat if one is left
//!     let taken = client
//!         .transact("take_seat", move |db: &mut BoxOffice| {
//!             db.tickets.update_where(&ticket.id, |t| t.seats_left > 0, |t| t.seats_left -= 1)
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(taken, Ok::<_, StoreError>(Some(())));
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for intercepting store requests in service tests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod schema;
pub mod table;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::ActorClient;
pub use error::{FrameworkError, StoreError};
pub use message::{Settlement, StoreRequest};
pub use record::Record;
pub use schema::Schema;
pub use table::Table;
