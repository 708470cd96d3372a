/// Represents a user's review of a book.
///
/// # Store
/// [`Review`] implements the [`Record`](store_actor::Record) trait. Its unique key is the
/// `(user, book)` pair, so the `reviews` table itself rejects a second review by the same
/// user for the same book.
use crate::model::{BookId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_actor::Record;

/// Type-safe identifier for Reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u32);

impl From<u32> for ReviewId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "review_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub book_id: BookId,
    /// Always within 1..=5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub user_id: UserId,
    pub book_id: BookId,
    pub rating: u8,
    pub title: String,
    pub comment: String,
}

impl Record for Review {
    type Id = ReviewId;
    type Draft = ReviewDraft;
    const TABLE: &'static str = "reviews";

    fn from_draft(id: ReviewId, draft: ReviewDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: draft.user_id,
            book_id: draft.book_id,
            rating: draft.rating,
            title: draft.title,
            comment: draft.comment,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &ReviewId {
        &self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.user_id, self.book_id))
    }
}

/// Payload for creating a review. The rating is taken as a plain integer and range-checked
/// by the review service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: BookId,
    pub rating: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial update; absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    pub rating: Option<i64>,
    pub title: Option<String>,
    pub comment: Option<String>,
}
