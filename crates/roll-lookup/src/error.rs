//! Lookup error types.

use thiserror::Error;

/// Errors that can occur while looking up an RA.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The page answered with a non-success status code.
    #[error("upstream error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the page.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The URL does not parse or is not `http`/`https`.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The URL's host is not in `lookup.allowed_hosts`.
    #[error("host not allowed: {0}")]
    HostNotAllowed(String),

    /// No marker label, or no label right after it.
    #[error("RA not found")]
    NotFound,
}
