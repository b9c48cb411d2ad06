//! PDF text extraction.

use crate::rag::RagError;

/// Extracts plain text from a PDF. Empty input and PDFs with no extractable
/// text are both rejected: a session cannot start without resume text.
pub fn extract_text(bytes: &[u8]) -> Result<String, RagError> {
    if bytes.is_empty() {
        return Err(RagError::Extraction("document is empty".to_string()));
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| RagError::Extraction(format!("unable to read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(RagError::Extraction(
            "no extractable text in PDF".to_string(),
        ));
    }

    Ok(text)
}
