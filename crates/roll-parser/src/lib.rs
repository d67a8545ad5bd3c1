//! # roll-parser
//!
//! Input parsing for rollcall.
//!
//! - [`sheet`]: the first sheet of an uploaded workbook (xlsx, xlsm, xlsb,
//!   xls, ods) into [`ImportRow`](roll_core::import::ImportRow)s, via calamine
//! - [`delimited`]: CSV and other delimited text uploads, via the csv crate
//! - [`html`]: the text of the `label` that follows a marker label, via the
//!   ast-grep HTML grammar
//!
//! All are synchronous and CPU-bound; async callers run sheet parsing on a
//! blocking thread.

pub mod delimited;
pub mod error;
pub mod html;
pub mod sheet;

pub use delimited::parse_delimited;
pub use error::ParserError;
pub use html::{extract_ra, find_label_after};
pub use sheet::parse_workbook;
