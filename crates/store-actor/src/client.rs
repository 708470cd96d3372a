//! # Store Client
//!
//! This module defines the handle used to submit transactions and reads to a store actor.

use crate::error::FrameworkError;
use crate::message::{ReadJob, Settlement, StoreRequest, TransactJob};
use crate::schema::Schema;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// The `StoreClient<S>` is the handle every service holds to reach the store. It forwards
/// transactions and reads over a Tokio mpsc channel and receives results through oneshot
/// channels.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Explicit** – services receive a client at construction; there is no global handle.
/// * **Generic** – works with any [`Schema`].
pub struct StoreClient<S: Schema> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: Schema> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: Schema> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    /// Runs `work` as one atomic unit.
    ///
    /// `Ok` commits every write `work` made; `Err` discards all of them. The outer `Result`
    /// reports transport failures: [`FrameworkError::ActorDropped`] also covers a `work`
    /// closure that panicked (its writes are rolled back).
    pub async fn transact<R, E, F>(
        &self,
        label: &'static str,
        work: F,
    ) -> Result<Result<R, E>, FrameworkError>
    where
        R: Send + 'static,
        E: Send + 'static,
        F: FnOnce(&mut S) -> Result<R, E> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: TransactJob<S> = Box::new(move |state: &mut S| {
            let result = work(state);
            let committed = result.is_ok();
            Settlement::new(committed, move || {
                let _ = respond_to.send(result);
            })
        });
        self.sender
            .send(StoreRequest::Transact { label, job })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Runs `query` against committed state and returns its value.
    pub async fn read<R, F>(&self, label: &'static str, query: F) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        F: FnOnce(&S) -> R + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: ReadJob<S> = Box::new(move |state: &S| {
            let _ = respond_to.send(query(state));
        });
        self.sender
            .send(StoreRequest::Read { label, job })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}
