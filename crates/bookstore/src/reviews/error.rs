use crate::error::ErrorKind;
use crate::model::{BookId, ReviewId};
use store_actor::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Book not found: {0}")]
    BookNotFound(BookId),
    #[error("You already reviewed {0}")]
    DuplicateReview(BookId),
    #[error("Review not found: {0}")]
    NotFound(ReviewId),
    #[error("Permission denied: not authorized to access {0}")]
    PermissionDenied(ReviewId),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::Validation(_) => ErrorKind::Validation,
            ReviewError::BookNotFound(_) | ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::DuplicateReview(_) => ErrorKind::Conflict,
            ReviewError::PermissionDenied(_) => ErrorKind::Permission,
            ReviewError::Storage(_) | ReviewError::ActorCommunicationError(_) => {
                ErrorKind::Internal
            }
        }
    }
}
