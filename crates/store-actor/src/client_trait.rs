//! # ActorClient Trait
//!
//! Provides a common interface for domain services that sit on top of a [`StoreClient`],
//! adding `transact` and `read` methods that speak the service's own error type.
use crate::{FrameworkError, Schema, StoreClient};
use async_trait::async_trait;

/// Trait for domain services to inherit error-mapped store access.
///
/// Implementors only say where their store handle is and how a transport failure should
/// look in their error type; the provided methods do the rest.
///
/// # Example
///
/// ```rust
/// use store_actor::{ActorClient, FrameworkError, Record, Schema, StoreClient, Table};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32, name: String }
///
/// impl Record for Tag {
///     type Id = u32;
///     type Draft = String;
///     const TABLE: &'static str = "tags";
///     fn from_draft(id: u32, name: String) -> Self { Self { id, name } }
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[derive(Default)]
/// struct Db { tags: Table<Tag> }
///
/// impl Schema for Db {
///     fn commit(&mut self) { self.tags.commit(); }
///     fn rollback(&mut self) { self.tags.rollback(); }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// enum TagError {
///     #[error("store unavailable: {0}")]
///     Unavailable(String),
/// }
///
/// struct TagService { store: StoreClient<Db> }
///
/// #[async_trait]
/// impl ActorClient<Db> for TagService {
///     type Error = TagError;
///
///     fn inner(&self) -> &StoreClient<Db> {
///         &self.store
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TagError::Unavailable(e.to_string())
///     }
/// }
///
/// async fn count(service: &TagService) -> Result<usize, TagError> {
///     // read() and transact() are provided automatically!
///     service.read("count_tags", |db: &Db| db.tags.len()).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<S: Schema>: Send + Sync {
    /// The service-specific error type.
    type Error: Send + 'static;

    /// Access the inner StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the service error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Run `work` as one atomic unit; see [`StoreClient::transact`].
    #[tracing::instrument(skip(self, work))]
    async fn transact<R, F>(&self, label: &'static str, work: F) -> Result<R, Self::Error>
    where
        R: Send + 'static,
        F: FnOnce(&mut S) -> Result<R, Self::Error> + Send + 'static,
    {
        tracing::debug!("Sending transaction");
        match self.inner().transact(label, work).await {
            Ok(result) => result,
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Run `query` against committed state; see [`StoreClient::read`].
    #[tracing::instrument(skip(self, query))]
    async fn read<R, F>(&self, label: &'static str, query: F) -> Result<R, Self::Error>
    where
        R: Send + 'static,
        F: FnOnce(&S) -> R + Send + 'static,
    {
        tracing::debug!("Sending read");
        self.inner().read(label, query).await.map_err(Self::map_error)
    }
}
