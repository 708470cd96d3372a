//! # Review Aggregator
//!
//! Review CRUD. Every write also rewrites the book's `avg_rating` / `num_of_reviews` through
//! [`aggregate::recompute`] in the same transaction, so a committed book row always
//! summarizes exactly the committed reviews.
//!
//! At most one review exists per `(user, book)`; the `reviews` table enforces it through
//! the row's unique key and the violation surfaces as [`ReviewError::DuplicateReview`].

pub mod aggregate;
pub mod error;

pub use error::*;

use crate::auth::Authorizer;
use crate::model::{BookId, NewReview, Principal, Review, ReviewDraft, ReviewId, ReviewPatch};
use crate::store::BookstoreTables;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use store_actor::{ActorClient, FrameworkError, StoreClient, StoreError};
use tracing::{info, instrument};

/// Accepts integers in `1..=5`.
pub fn check_rating(rating: i64) -> Result<u8, ReviewError> {
    match u8::try_from(rating) {
        Ok(r @ 1..=5) => Ok(r),
        _ => Err(ReviewError::Validation(
            "rating must be an integer 1..5".to_string(),
        )),
    }
}

#[derive(Clone)]
pub struct ReviewService {
    store: StoreClient<BookstoreTables>,
    authorizer: Arc<dyn Authorizer>,
}

impl ReviewService {
    pub fn new(store: StoreClient<BookstoreTables>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    /// Creates the caller's review of a book. Missing title and comment become empty strings.
    #[instrument(
        skip(self, principal, review),
        fields(user_id = %principal.id, book_id = %review.book_id)
    )]
    pub async fn create_review(
        &self,
        principal: &Principal,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        let rating = check_rating(review.rating)?;
        let book_id = review.book_id;
        let draft = ReviewDraft {
            user_id: principal.id,
            book_id,
            rating,
            title: review.title.unwrap_or_default(),
            comment: review.comment.unwrap_or_default(),
        };

        let created = self
            .transact("create_review", move |tables: &mut BookstoreTables| {
                if tables.books.get(&book_id).is_none() {
                    return Err(ReviewError::BookNotFound(book_id));
                }
                let review = tables.reviews.insert(draft).map_err(|e| match e {
                    StoreError::UniqueViolation { .. } => ReviewError::DuplicateReview(book_id),
                    other => ReviewError::Storage(other),
                })?;
                aggregate::recompute(tables, &book_id)?;
                Ok(review)
            })
            .await?;

        info!(review_id = %created.id, "Review created");
        Ok(created)
    }

    #[instrument(skip(self, principal, patch), fields(user_id = %principal.id))]
    pub async fn update_review(
        &self,
        principal: &Principal,
        review_id: ReviewId,
        patch: ReviewPatch,
    ) -> Result<Review, ReviewError> {
        let rating = patch.rating.map(check_rating).transpose()?;

        let principal = principal.clone();
        let authorizer = Arc::clone(&self.authorizer);
        let updated = self
            .transact("update_review", move |tables: &mut BookstoreTables| {
                let existing = authorized(tables, authorizer.as_ref(), &principal, review_id)?;
                let review = tables.reviews.update(&review_id, |r| {
                    if let Some(rating) = rating {
                        r.rating = rating;
                    }
                    if let Some(title) = patch.title {
                        r.title = title;
                    }
                    if let Some(comment) = patch.comment {
                        r.comment = comment;
                    }
                    r.updated_at = Utc::now();
                    r.clone()
                })?;
                aggregate::recompute(tables, &existing.book_id)?;
                Ok(review)
            })
            .await?;

        info!(review_id = %review_id, "Review updated");
        Ok(updated)
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn delete_review(
        &self,
        principal: &Principal,
        review_id: ReviewId,
    ) -> Result<(), ReviewError> {
        let principal = principal.clone();
        let authorizer = Arc::clone(&self.authorizer);
        self.transact("delete_review", move |tables: &mut BookstoreTables| {
            authorized(tables, authorizer.as_ref(), &principal, review_id)?;
            let removed = tables.reviews.remove(&review_id)?;
            aggregate::recompute(tables, &removed.book_id)?;
            Ok(())
        })
        .await?;

        info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    /// Every review, newest first.
    #[instrument(skip(self))]
    pub async fn get_all_reviews(&self) -> Result<Vec<Review>, ReviewError> {
        self.read("get_all_reviews", |tables: &BookstoreTables| {
            newest_first(tables.reviews.iter().cloned().collect())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_single_review(&self, review_id: ReviewId) -> Result<Review, ReviewError> {
        self.read("get_single_review", move |tables: &BookstoreTables| {
            tables.reviews.get(&review_id).cloned()
        })
        .await?
        .ok_or(ReviewError::NotFound(review_id))
    }

    /// Reviews of one book, newest first. An unknown book simply has none.
    #[instrument(skip(self))]
    pub async fn get_reviews_for_book(
        &self,
        book_id: BookId,
    ) -> Result<Vec<Review>, ReviewError> {
        self.read("get_reviews_for_book", move |tables: &BookstoreTables| {
            newest_first(
                tables
                    .reviews
                    .filter(|review| review.book_id == book_id)
                    .cloned()
                    .collect(),
            )
        })
        .await
    }
}

/// Loads a review the principal may modify.
fn authorized(
    tables: &BookstoreTables,
    authorizer: &dyn Authorizer,
    principal: &Principal,
    review_id: ReviewId,
) -> Result<Review, ReviewError> {
    let review = tables
        .reviews
        .get(&review_id)
        .cloned()
        .ok_or(ReviewError::NotFound(review_id))?;
    if !authorizer.allows(principal, &review.user_id) {
        return Err(ReviewError::PermissionDenied(review_id));
    }
    Ok(review)
}

fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    reviews
}

#[async_trait]
impl ActorClient<BookstoreTables> for ReviewService {
    type Error = ReviewError;

    fn inner(&self) -> &StoreClient<BookstoreTables> {
        &self.store
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ReviewError::ActorCommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::OwnerOrAdmin;
    use crate::error::ErrorKind;
    use store_actor::mock::{create_mock_client, expect_transaction};

    #[test]
    fn test_check_rating_bounds() {
        assert_eq!(check_rating(1), Ok(1));
        assert_eq!(check_rating(5), Ok(5));
        for bad in [0, 6, -1, 256] {
            let err = check_rating(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_invalid_rating_never_reaches_store() {
        let (client, mut receiver) = create_mock_client::<BookstoreTables>(10);
        let reviews = ReviewService::new(client, Arc::new(OwnerOrAdmin));

        let err = reviews
            .create_review(
                &Principal::user(1),
                NewReview {
                    book_id: BookId(1),
                    rating: 9,
                    title: None,
                    comment: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Validation(_)));

        let patch = ReviewPatch {
            rating: Some(0),
            ..Default::default()
        };
        let err = reviews
            .update_review(&Principal::user(1), ReviewId(1), patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Validation(_)));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_missing_book_rolls_back() {
        let (client, mut receiver) = create_mock_client::<BookstoreTables>(10);
        let reviews = ReviewService::new(client, Arc::new(OwnerOrAdmin));
        let mut fixture = BookstoreTables::default();

        let task = tokio::spawn(async move {
            reviews
                .create_review(
                    &Principal::user(1),
                    NewReview {
                        book_id: BookId(4),
                        rating: 4,
                        title: Some("Great".to_string()),
                        comment: None,
                    },
                )
                .await
        });

        let pending = expect_transaction(&mut receiver)
            .await
            .expect("Expected Transact request");
        assert_eq!(pending.label(), "create_review");
        assert!(!pending.apply(&mut fixture));

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            ReviewError::BookNotFound(BookId(4))
        );
        assert!(fixture.reviews.is_empty());
    }
}
