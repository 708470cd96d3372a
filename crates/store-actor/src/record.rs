//! # Record Trait
//!
//! The `Record` trait defines the contract every row type (Book, Order, Review, …) must
//! implement to live in a [`Table`](crate::table::Table). It specifies the identifier type,
//! the draft payload used on insert, and an optional unique key that the table enforces.
//!
//! # Architecture Note
//! By defining one contract that all row types satisfy, the table, journal and actor logic
//! is written *once* and reused for every kind of row.
//!
//! Associated types keep inserts type safe: a `Book` table accepts a `BookDraft`, and you
//! can't accidentally hand it a `ReviewDraft`.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted row type must implement to be stored in a [`Table`](crate::table::Table).
///
/// # Provided Methods
/// - [`Record::unique_key`] defaults to `None` (no unique index).
pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier for this row.
    /// Must be convertible from u32 so the table can hand out ids from its sequence.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Everything needed to build a row except its id.
    type Draft: Send + Debug;

    /// Table name used in logs and storage errors.
    const TABLE: &'static str;

    /// Construct the full row from the assigned id and the draft.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// The row's primary key.
    fn id(&self) -> &Self::Id;

    /// Value of the row's unique index, if the table has one.
    ///
    /// Two rows in the same table may never return the same `Some` key.
    fn unique_key(&self) -> Option<String> {
        None
    }
}
