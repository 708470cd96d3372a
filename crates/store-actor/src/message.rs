//! # Store Messages
//!
//! This module defines the message types sent from a [`StoreClient`](crate::client::StoreClient)
//! to a [`StoreActor`](crate::actor::StoreActor).
//!
//! Unlike a CRUD protocol with one variant per operation, the store ships *work*: each
//! request carries a boxed closure that the actor runs against its schema. The closure owns
//! the caller's response channel, so the actor never needs to know the result type.

use std::fmt;

/// Work executed inside a transaction. Returns how the transaction settled.
pub type TransactJob<S> = Box<dyn FnOnce(&mut S) -> Settlement + Send>;

/// Work executed against committed state.
pub type ReadJob<S> = Box<dyn FnOnce(&S) + Send>;

/// Outcome of a transaction job, handed back to the actor.
///
/// The actor commits or rolls back according to [`Settlement::is_committed`] and only then
/// calls [`Settlement::deliver`], so a caller never observes its result before the
/// corresponding writes are permanent (or gone).
pub struct Settlement {
    committed: bool,
    deliver: Box<dyn FnOnce() + Send>,
}

impl Settlement {
    pub fn new(committed: bool, deliver: impl FnOnce() + Send + 'static) -> Self {
        Self {
            committed,
            deliver: Box::new(deliver),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Sends the result back to the waiting caller.
    pub fn deliver(self) {
        (self.deliver)()
    }
}

/// Request sent to the store actor.
///
/// `label` names the operation in logs (e.g. `"confirm_order"`).
pub enum StoreRequest<S> {
    Transact {
        label: &'static str,
        job: TransactJob<S>,
    },
    Read {
        label: &'static str,
        job: ReadJob<S>,
    },
}

impl<S> StoreRequest<S> {
    pub fn label(&self) -> &'static str {
        match self {
            StoreRequest::Transact { label, .. } | StoreRequest::Read { label, .. } => label,
        }
    }
}

impl<S> fmt::Debug for StoreRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreRequest::Transact { label, .. } => {
                f.debug_struct("Transact").field("label", label).finish()
            }
            StoreRequest::Read { label, .. } => f.debug_struct("Read").field("label", label).finish(),
        }
    }
}
