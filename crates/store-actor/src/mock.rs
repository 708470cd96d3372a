//! # Mock Store & Testing Guide
//!
//! Services built on [`ActorClient`](crate::ActorClient) can be tested two ways:
//!
//! | Feature | Mock receiver | Real actor |
//! |---------|---------------|------------|
//! | **State** | Whatever fixture the test builds | Real tables |
//! | **Determinism** | Test decides when each request completes | Subject to scheduler |
//! | **Fault injection** | Easy (`abandon`) | Hard (requires a panic) |
//! | **Use Case** | Checking what a service sends and how it handles faults | End-to-end behavior |
//!
//! [`create_mock_client`] gives you a client plus the receiving end of its channel. The test
//! then pulls requests off the channel with [`expect_transaction`] / [`expect_read`] and
//! decides what happens to each one.
//!
//! ```rust
//! use store_actor::mock::{create_mock_client, expect_transaction};
//! use store_actor::{FrameworkError, Schema};
//!
//! #[derive(Default)]
//! struct Empty;
//! impl Schema for Empty {
//!     fn commit(&mut self) {}
//!     fn rollback(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client::<Empty>(10);
//!
//!     let call = tokio::spawn(async move {
//!         client.transact("noop", |_: &mut Empty| Ok::<_, ()>(1)).await
//!     });
//!
//!     // Simulate a storage fault: the caller sees its response channel dropped
//!     let pending = expect_transaction(&mut receiver).await.unwrap();
//!     assert_eq!(pending.label(), "noop");
//!     pending.abandon();
//!
//!     assert_eq!(call.await.unwrap(), Err(FrameworkError::ActorDropped));
//! }
//! ```

use crate::client::StoreClient;
use crate::message::{ReadJob, StoreRequest, TransactJob};
use crate::schema::Schema;
use tokio::sync::mpsc;

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// We don't want to spin up a full `StoreActor` when we are only testing how a service
/// talks to the store. The receiver lets the test play the actor: inspect each request,
/// apply it to a fixture, or drop it.
pub fn create_mock_client<S: Schema>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// A transaction intercepted by the test.
pub struct PendingTransaction<S> {
    label: &'static str,
    job: TransactJob<S>,
}

impl<S: Schema> PendingTransaction<S> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Runs the transaction against `state` the way the actor would: commit on success,
    /// roll back on failure, then deliver the result. Returns whether it committed.
    pub fn apply(self, state: &mut S) -> bool {
        let settlement = (self.job)(state);
        let committed = settlement.is_committed();
        if committed {
            state.commit();
        } else {
            state.rollback();
        }
        settlement.deliver();
        committed
    }

    /// Drops the transaction unexecuted. The caller observes `ActorDropped`.
    pub fn abandon(self) {}
}

/// A read intercepted by the test.
pub struct PendingRead<S> {
    label: &'static str,
    job: ReadJob<S>,
}

impl<S: Schema> PendingRead<S> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Answers the read from `state`.
    pub fn apply(self, state: &S) {
        (self.job)(state)
    }

    /// Drops the read unexecuted. The caller observes `ActorDropped`.
    pub fn abandon(self) {}
}

/// Helper to verify that the next message is a transaction.
pub async fn expect_transaction<S: Schema>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<PendingTransaction<S>> {
    match receiver.recv().await {
        Some(StoreRequest::Transact { label, job }) => Some(PendingTransaction { label, job }),
        _ => None,
    }
}

/// Helper to verify that the next message is a read.
pub async fn expect_read<S: Schema>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<PendingRead<S>> {
    match receiver.recv().await {
        Some(StoreRequest::Read { label, job }) => Some(PendingRead { label, job }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::record::Record;
    use crate::table::Table;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    impl Record for Item {
        type Id = u32;
        type Draft = String;
        const TABLE: &'static str = "items";

        fn from_draft(id: u32, name: String) -> Self {
            Self { id, name }
        }

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[derive(Default)]
    struct Shelf {
        items: Table<Item>,
    }

    impl Schema for Shelf {
        fn commit(&mut self) {
            self.items.commit();
        }

        fn rollback(&mut self) {
            self.items.rollback();
        }
    }

    #[tokio::test]
    async fn test_apply_commits_into_fixture() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);
        let mut fixture = Shelf::default();

        let task = tokio::spawn(async move {
            client
                .transact("add_item", |shelf: &mut Shelf| {
                    shelf.items.insert("lamp".to_string())
                })
                .await
        });

        let pending = expect_transaction(&mut receiver)
            .await
            .expect("Expected Transact request");
        assert_eq!(pending.label(), "add_item");
        assert!(pending.apply(&mut fixture));

        let item = task.await.unwrap().unwrap().unwrap();
        assert_eq!(item.name, "lamp");
        assert_eq!(fixture.items.len(), 1);
        assert_eq!(fixture.items.pending_writes(), 0);
    }

    #[tokio::test]
    async fn test_apply_rolls_back_failed_work() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);
        let mut fixture = Shelf::default();

        let task = tokio::spawn(async move {
            client
                .transact("add_then_fail", |shelf: &mut Shelf| {
                    shelf.items.insert("lamp".to_string())?;
                    shelf.items.remove(&42)
                })
                .await
        });

        let pending = expect_transaction(&mut receiver).await.unwrap();
        assert!(!pending.apply(&mut fixture));

        let result = task.await.unwrap().unwrap();
        assert!(matches!(result, Err(StoreError::NotFound { table: "items", .. })));
        assert!(fixture.items.is_empty());
    }

    #[tokio::test]
    async fn test_read_is_answered_from_fixture() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);
        let mut fixture = Shelf::default();
        fixture.items.insert("desk".to_string()).unwrap();
        fixture.commit();

        let task = tokio::spawn(async move {
            client
                .read("count", |shelf: &Shelf| shelf.items.len())
                .await
        });

        let pending = expect_read(&mut receiver).await.expect("Expected Read request");
        assert_eq!(pending.label(), "count");
        pending.apply(&fixture);

        assert_eq!(task.await.unwrap(), Ok(1));
    }
}
