//! # Schema Trait
//!
//! A schema is the full set of tables owned by one [`StoreActor`](crate::actor::StoreActor).
//! The actor never looks inside it; it only needs to tell every table to commit or to roll
//! back once a transaction has finished.

/// A group of [`Table`](crate::table::Table)s that commit and roll back together.
///
/// ```rust
/// use store_actor::{Record, Schema, Table};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
///
/// impl Record for Note {
///     type Id = u32;
///     type Draft = String;
///     const TABLE: &'static str = "notes";
///     fn from_draft(id: u32, text: String) -> Self { Self { id, text } }
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[derive(Default)]
/// struct Notebook { notes: Table<Note> }
///
/// impl Schema for Notebook {
///     fn commit(&mut self) { self.notes.commit(); }
///     fn rollback(&mut self) { self.notes.rollback(); }
/// }
/// ```
pub trait Schema: Send + 'static {
    /// Makes every write of the finished transaction permanent.
    fn commit(&mut self);

    /// Discards every write of the finished transaction.
    fn rollback(&mut self);
}
