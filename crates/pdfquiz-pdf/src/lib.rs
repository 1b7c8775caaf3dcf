//! PDF Quiz Text Extraction
//!
//! Pulls plain text out of PDF files with `lopdf`.
//!
//! Two entry points:
//!
//! - [`extract_pages`] returns per-page text or a [`PdfError`]
//! - [`PdfTextExtractor`] implements the domain `TextExtractor` trait and
//!   turns every failure into an empty string, which callers read as
//!   "no extractable text"

#![warn(missing_docs)]

mod error;
mod extract;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::PdfError;
pub use extract::{extract_pages, PdfTextExtractor};
