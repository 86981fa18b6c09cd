//! PDF → plain text.

use itmo_advisor_shared::{AdvisorError, Result};

/// Converts a binary document into per-page text.
pub trait TextExtractor: Send + Sync {
    /// Text of every page, in page order.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// Join per-page text into one document, newline-separated.
pub fn document_text(pages: &[String]) -> String {
    pages.join("\n")
}

/// [`TextExtractor`] backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| AdvisorError::Pdf(format!("failed to load document: {e}")))?;

        // get_pages() is keyed by 1-based page number, so iteration is in page order.
        doc.get_pages()
            .keys()
            .map(|&page| {
                doc.extract_text(&[page]).map_err(|e| {
                    AdvisorError::Pdf(format!("failed to extract text of page {page}: {e}"))
                })
            })
            .collect()
    }
}
