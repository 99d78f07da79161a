// src/services/extract.rs
// PDF text ingestion: uploaded bytes -> plain text

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no extractable text in document")]
    NoText,

    #[error("unreadable PDF: {0}")]
    Unreadable(String),
}

/// Extract the concatenated text of all pages from a PDF byte blob.
///
/// Page boundaries are discarded; the result is trimmed. A document that
/// parses but carries no text (scanned image, empty file) is reported as
/// `ExtractError::NoText` so callers can fail the request without treating
/// it as a server error.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::NoText);
    }

    debug!(chars = trimmed.len(), "Extracted text from PDF");
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_unreadable_not_a_panic() {
        let result = extract_text(b"this is not a pdf at all");
        assert!(matches!(result, Err(ExtractError::Unreadable(_))));
    }

    #[test]
    fn empty_input_is_unreadable() {
        let result = extract_text(&[]);
        assert!(matches!(result, Err(ExtractError::Unreadable(_))));
    }

    #[test]
    fn pdf_without_text_yields_no_text_sentinel() {
        // A structurally valid PDF produced by the renderer from an empty
        // string carries no text operators.
        let pdf = crate::services::pdf::render_pdf("").unwrap();
        let result = extract_text(&pdf);
        assert!(matches!(result, Err(ExtractError::NoText)));
    }
}
