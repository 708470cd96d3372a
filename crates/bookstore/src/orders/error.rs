use crate::error::ErrorKind;
use crate::model::{BookId, OrderId};
use crate::payment::PaymentError;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The cart is empty, has a zero amount, lacks tax or shipping fee, or overflows.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),
    /// A cart line names a book that does not exist.
    #[error("No book with id: {0}")]
    BookNotFound(BookId),
    /// Stock cannot cover a line, either at the advisory check or at confirmation.
    #[error("Insufficient stock for {title}: requested {requested}")]
    InsufficientStock {
        book_id: BookId,
        title: String,
        requested: u32,
    },
    /// The requested order was not found.
    #[error("No order with id: {0}")]
    NotFound(OrderId),
    /// The caller is neither the owner nor an admin.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// A required field of a confirmation is missing.
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidCart(_) | OrderError::BadRequest(_) => ErrorKind::Validation,
            OrderError::BookNotFound(_) | OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::PermissionDenied(_) => ErrorKind::Permission,
            OrderError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            OrderError::Payment(_)
            | OrderError::Storage(_)
            | OrderError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
