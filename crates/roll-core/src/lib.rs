//! # roll-core
//!
//! Core types shared by every rollcall crate.
//!
//! - Entity structs for the roster and attendance tables
//! - Import kinds with their spreadsheet column specs
//! - Cell values and import rows produced by the sheet parser
//! - Request bodies and query strings accepted by the HTTP service, with validation
//! - JSON response bodies returned by the HTTP service
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod import;
pub mod requests;
pub mod responses;
