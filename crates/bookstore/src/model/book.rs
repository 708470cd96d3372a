/// Represents a book in the catalog.
///
/// # Store
/// This struct implements the [`Record`](store_actor::Record) trait, so it lives in the
/// `books` [`Table`](store_actor::Table) of [`BookstoreTables`](crate::store::BookstoreTables).
///
/// Field ownership:
/// - `title`, `price`, `thumbnail`: catalog
/// - `inventory`: [`inventory`](crate::inventory) ledger
/// - `avg_rating`, `num_of_reviews`: [`reviews::aggregate`](crate::reviews::aggregate)
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_actor::Record;

/// Type-safe identifier for Books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u32);

impl From<u32> for BookId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Integer cents.
    pub price: u64,
    pub inventory: u32,
    pub thumbnail: Option<String>,
    pub avg_rating: f64,
    pub num_of_reviews: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a book to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub price: u64,
    pub inventory: u32,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, price: u64, inventory: u32) -> Self {
        Self {
            title: title.into(),
            price,
            inventory,
            thumbnail: None,
        }
    }
}

impl Record for Book {
    type Id = BookId;
    type Draft = BookDraft;
    const TABLE: &'static str = "books";

    /// New books start with an empty rating summary.
    fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            inventory: draft.inventory,
            thumbnail: draft.thumbnail,
            avg_rating: 0.0,
            num_of_reviews: 0,
            created_at: Utc::now(),
        }
    }

    fn id(&self) -> &BookId {
        &self.id
    }
}
