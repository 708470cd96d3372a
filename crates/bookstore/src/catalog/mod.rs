//! # Catalog Accessor
//!
//! Read access to book records. Product management is not part of this crate; [`add_book`]
//! exists so a catalog can be seeded.
//!
//! [`add_book`]: CatalogClient::add_book

pub mod error;

pub use error::*;

use crate::model::{Book, BookDraft, BookId};
use crate::store::BookstoreTables;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, StoreClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct CatalogClient {
    store: StoreClient<BookstoreTables>,
}

impl CatalogClient {
    pub fn new(store: StoreClient<BookstoreTables>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn add_book(&self, draft: BookDraft) -> Result<Book, CatalogError> {
        let book = self
            .transact("add_book", move |tables: &mut BookstoreTables| {
                Ok(tables.books.insert(draft)?)
            })
            .await?;
        info!(book_id = %book.id, "Book added");
        Ok(book)
    }

    #[instrument(skip(self))]
    pub async fn get_book(&self, id: BookId) -> Result<Book, CatalogError> {
        debug!("Fetching book");
        self.read("get_book", move |tables: &BookstoreTables| {
            tables.books.get(&id).cloned()
        })
        .await?
        .ok_or(CatalogError::NotFound(id))
    }

    /// All books, oldest first.
    #[instrument(skip(self))]
    pub async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        self.read("list_books", |tables: &BookstoreTables| {
            let mut books: Vec<Book> = tables.books.iter().cloned().collect();
            books.sort_by_key(|b| b.id);
            books
        })
        .await
    }
}

#[async_trait]
impl ActorClient<BookstoreTables> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &StoreClient<BookstoreTables> {
        &self.store
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CatalogError::ActorCommunicationError(e.to_string())
    }
}
