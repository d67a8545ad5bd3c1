//! JSON bodies returned by the rollcall HTTP API.
//!
//! Listing endpoints return the entity structs directly; these cover the
//! remaining message-shaped responses.

use serde::{Deserialize, Serialize};

/// Message shown after a successful insert.
pub const INSERTED_MESSAGE: &str = "Data inserted successfully!";

/// Response from `POST /api/mark-attendance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn inserted() -> Self {
        Self {
            message: INSERTED_MESSAGE.to_string(),
        }
    }
}

/// Response from `POST /api/upload/{classes,students}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportResponse {
    pub message: String,
    /// Number of rows committed.
    pub inserted: usize,
}

/// Response from `GET /api/ra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaResponse {
    pub ra: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
