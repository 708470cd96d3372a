//! # Inventory Ledger
//!
//! Owns the `inventory` column of the books table. There are two ways to touch it:
//!
//! - [`InventoryLedger::check_availability`]: an advisory read. It reserves nothing, so a
//!   positive answer can be stale by the time anything is written.
//! - [`decrement`]: the binding conditional write. It only runs inside a caller's
//!   transaction, and it either takes the whole amount or reports [`Decrement::ZeroRows`]
//!   without writing.
//!
//! ```rust
//! use bookstore::inventory::{decrement, Decrement};
//! use bookstore::model::{BookDraft, BookId};
//! use bookstore::store::BookstoreTables;
//!
//! let mut tables = BookstoreTables::default();
//! tables.books.insert(BookDraft::new("Dune", 500, 1)).unwrap();
//!
//! let first = decrement(&mut tables, &BookId(1), 1).unwrap();
//! assert_eq!(first, Decrement::Applied { remaining: 0 });
//!
//! let second = decrement(&mut tables, &BookId(1), 1).unwrap();
//! assert_eq!(second, Decrement::ZeroRows);
//! ```

use crate::catalog::CatalogError;
use crate::model::{Book, BookId};
use crate::store::BookstoreTables;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Outcome of a conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrement {
    Applied { remaining: u32 },
    /// Stock was below the requested amount; nothing was written.
    ZeroRows,
}

/// Whether `book` currently holds at least `amount` units.
pub fn has_available_stock(book: &Book, amount: u32) -> bool {
    book.inventory >= amount
}

/// Takes `amount` units from a book, only if that leaves the inventory non-negative.
///
/// Must be called from inside a transaction; the caller decides whether `ZeroRows` aborts it.
///
/// # Errors
/// [`StoreError::NotFound`] if the book no longer exists.
pub fn decrement(
    tables: &mut BookstoreTables,
    book_id: &BookId,
    amount: u32,
) -> Result<Decrement, StoreError> {
    let outcome = tables.books.update_where(
        book_id,
        |book| has_available_stock(book, amount),
        |book| {
            book.inventory -= amount;
            book.inventory
        },
    )?;
    Ok(match outcome {
        Some(remaining) => Decrement::Applied { remaining },
        None => Decrement::ZeroRows,
    })
}

/// Read side of the ledger.
#[derive(Clone)]
pub struct InventoryLedger {
    store: StoreClient<BookstoreTables>,
}

impl InventoryLedger {
    pub fn new(store: StoreClient<BookstoreTables>) -> Self {
        Self { store }
    }

    /// Non-binding stock check.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        book_id: BookId,
        amount: u32,
    ) -> Result<bool, CatalogError> {
        let available = self
            .read("check_availability", move |tables: &BookstoreTables| {
                tables
                    .books
                    .get(&book_id)
                    .map(|book| has_available_stock(book, amount))
            })
            .await?
            .ok_or(CatalogError::NotFound(book_id))?;
        debug!(available, "Checked availability");
        Ok(available)
    }
}

#[async_trait]
impl ActorClient<BookstoreTables> for InventoryLedger {
    type Error = CatalogError;

    fn inner(&self) -> &StoreClient<BookstoreTables> {
        &self.store
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CatalogError::ActorCommunicationError(e.to_string())
    }
}
