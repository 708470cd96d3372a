use crate::error::ErrorKind;
use crate::model::BookId;
use store_actor::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book not found: {0}")]
    NotFound(BookId),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Storage(StoreError::NotFound { .. }) => ErrorKind::NotFound,
            CatalogError::Storage(_) | CatalogError::ActorCommunicationError(_) => {
                ErrorKind::Internal
            }
        }
    }
}
