//! Rating summary kept on each book row.
//!
//! [`recompute`] always rescans the book's reviews; it is called inside the same transaction
//! as the review write, so it sees that write.

use crate::model::BookId;
use crate::store::BookstoreTables;
use store_actor::StoreError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub num_of_reviews: u32,
}

impl RatingSummary {
    pub const EMPTY: RatingSummary = RatingSummary {
        avg_rating: 0.0,
        num_of_reviews: 0,
    };
}

/// Mean and count of `ratings`; the mean of nothing is 0.
pub fn summarize(ratings: impl IntoIterator<Item = u8>) -> RatingSummary {
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u32), |(sum, count), r| (sum + u64::from(r), count + 1));
    if count == 0 {
        return RatingSummary::EMPTY;
    }
    RatingSummary {
        avg_rating: sum as f64 / f64::from(count),
        num_of_reviews: count,
    }
}

/// Rescans the reviews of `book_id` and writes the summary to the book.
///
/// # Errors
/// [`StoreError::NotFound`] if the book does not exist.
pub fn recompute(
    tables: &mut BookstoreTables,
    book_id: &BookId,
) -> Result<RatingSummary, StoreError> {
    let summary = summarize(
        tables
            .reviews
            .filter(|review| review.book_id == *book_id)
            .map(|review| review.rating),
    );
    tables.books.update(book_id, |book| {
        book.avg_rating = summary.avg_rating;
        book.num_of_reviews = summary.num_of_reviews;
    })?;
    Ok(summary)
}
