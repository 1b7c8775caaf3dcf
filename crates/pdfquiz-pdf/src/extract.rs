//! Page text extraction

use crate::error::PdfError;
use lopdf::Document;
use pdfquiz_domain::traits::TextExtractor;
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text of every page, in page order
pub fn extract_pages(path: &Path) -> Result<Vec<String>, PdfError> {
    let doc = Document::load(path).map_err(|e| PdfError::Load(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(PdfError::Encrypted);
    }

    let pages = doc.get_pages();
    debug!("Loaded {:?} with {} pages", path, pages.len());

    pages
        .keys()
        .map(|&page| {
            doc.extract_text(&[page])
                .map_err(|e| PdfError::Extraction {
                    page,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// `TextExtractor` backed by `lopdf`
///
/// Pages are concatenated, each followed by a newline. Any failure is
/// logged and yields an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> String {
        match extract_pages(path) {
            Ok(pages) => {
                let mut text = String::new();
                for page in pages {
                    text.push_str(&page);
                    text.push('\n');
                }
                text
            }
            Err(e) => {
                warn!("Error extracting text from {:?}: {}", path, e);
                String::new()
            }
        }
    }
}
