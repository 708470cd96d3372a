//! # Framework Errors
//!
//! This module defines the error types shared by the store actor and every client built
//! on top of it. Transport failures and storage failures are kept apart so callers can
//! tell "the actor is gone" from "the write was refused".

/// Errors raised while talking to the store actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Error kinds returned by table writes.
///
/// These are engine-neutral: callers match on the variant, never on a message string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No row with this id exists in the table.
    #[error("{table}: no row with id {id}")]
    NotFound { table: &'static str, id: String },

    /// The write would give two rows the same unique key.
    #[error("{table}: unique key {key} already exists")]
    UniqueViolation { table: &'static str, key: String },
}
