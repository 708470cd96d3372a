//! # Store Actor
//!
//! This module defines the `StoreActor`, the single owner of a [`Schema`]. It implements the
//! "Server" side of the Actor Model: requests are processed one at a time, so every
//! transaction sees the committed result of the one before it and nothing else.

use crate::client::StoreClient;
use crate::message::StoreRequest;
use crate::schema::Schema;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The actor that owns all tables of a schema.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the receiver end of
/// the channel.
///
/// **Concurrency Model**:
/// Any number of clients may submit work concurrently, but the actor runs each transaction
/// to completion before taking the next message. That gives serializable isolation without
/// a `Mutex` or `RwLock`: exclusive ownership of the state within the task is the lock.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (handle).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Inject**: Hand clones of the client to every service that needs the store.
///
/// ```rust
/// use store_actor::{Record, Schema, StoreActor, StoreError, Table};
///
/// #[derive(Clone, Debug)]
/// struct Counter { id: u32, value: u32 }
///
/// impl Record for Counter {
///     type Id = u32;
///     type Draft = u32;
///     const TABLE: &'static str = "counters";
///     fn from_draft(id: u32, value: u32) -> Self { Self { id, value } }
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[derive(Default)]
/// struct Db { counters: Table<Counter> }
///
/// impl Schema for Db {
///     fn commit(&mut self) { self.counters.commit(); }
///     fn rollback(&mut self) { self.counters.rollback(); }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(10, Db::default());
///     tokio::spawn(actor.run());
///
///     let created = client
///         .transact("create", |db: &mut Db| db.counters.insert(7))
///         .await
///         .unwrap();
///     assert_eq!(created.map(|c| c.value), Ok::<_, StoreError>(7));
/// }
/// ```
///
/// # Transaction Handling
///
/// * **Transact**:
///     1. Runs the job against the live state; every table journals its writes.
///     2. `Ok` → `commit()`, `Err` → `rollback()`.
///     3. A panic inside the job → `rollback()`; the caller's channel is dropped.
///     4. The result is delivered after step 2 or 3.
///
/// * **Read**:
///     1. Runs the query against committed state.
pub struct StoreActor<S: Schema> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    committed: u64,
    rolled_back: u64,
}

impl<S: Schema> StoreActor<S> {
    /// Creates a new `StoreActor` owning `state`, and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `state` - The initial schema contents.
    pub fn new(buffer_size: usize, state: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state,
            committed: 0,
            rolled_back: 0,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "BookstoreTables" instead of the full path)
        let schema = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(schema, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Transact { label, job } => {
                    let outcome = catch_unwind(AssertUnwindSafe(|| job(&mut self.state)));
                    match outcome {
                        Ok(settlement) if settlement.is_committed() => {
                            self.state.commit();
                            self.committed += 1;
                            debug!(schema, label, "Committed");
                            settlement.deliver();
                        }
                        Ok(settlement) => {
                            self.state.rollback();
                            self.rolled_back += 1;
                            warn!(schema, label, "Rolled back");
                            settlement.deliver();
                        }
                        Err(_) => {
                            self.state.rollback();
                            self.rolled_back += 1;
                            error!(schema, label, "Transaction panicked, rolled back");
                        }
                    }
                }
                StoreRequest::Read { label, job } => {
                    debug!(schema, label, "Read");
                    if catch_unwind(AssertUnwindSafe(|| job(&self.state))).is_err() {
                        error!(schema, label, "Read panicked");
                    }
                }
            }
        }

        info!(
            schema,
            committed = self.committed,
            rolled_back = self.rolled_back,
            "Shutdown"
        );
    }
}
