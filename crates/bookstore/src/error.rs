//! Error taxonomy shared by every bookstore service.
//!
//! Each service keeps its own `thiserror` enum; [`ErrorKind`] is the coarse class a caller
//! (or a transport layer) branches on.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input. Never retried automatically.
    Validation,
    NotFound,
    Permission,
    /// Duplicate review.
    Conflict,
    /// Advisory or binding stock failure.
    InsufficientStock,
    /// Storage fault or anything unexpected.
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Permission => "PermissionError",
            ErrorKind::Conflict => "ConflictError",
            ErrorKind::InsufficientStock => "InsufficientStockError",
            ErrorKind::Internal => "InternalError",
        };
        f.write_str(name)
    }
}
