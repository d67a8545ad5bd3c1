//! Cross-cutting error types for rollcall.
//!
//! Domain-specific errors (`DatabaseError`, `ParserError`, `LookupError`) live
//! in their own crates. They converge in `roll-server`'s `ApiError`.

use thiserror::Error;

/// Errors that can be raised by any rollcall crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, range).
    #[error("Validation error: {0}")]
    Validation(String),
}
