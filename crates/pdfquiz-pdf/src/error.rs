//! Error types for PDF extraction

use thiserror::Error;

/// Errors that can occur while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// File could not be opened or parsed as a PDF
    #[error("Failed to load PDF: {0}")]
    Load(String),

    /// Document is encrypted
    #[error("PDF is encrypted")]
    Encrypted,

    /// A page's text could not be decoded
    #[error("Failed to extract text from page {page}: {message}")]
    Extraction {
        /// 1-based page number
        page: u32,
        /// Underlying parser message
        message: String,
    },
}
