//! PDF extraction strategy backed by `pdf_oxide`.

use std::path::Path;

use pdf_oxide::PdfDocument;

use super::ExtractError;

/// Concatenate the text of every page of the PDF at `path`, in page order.
///
/// Each page ends with a line break so the last word of one page never runs
/// into the first word of the next.
///
/// The document handle lives only inside this function and is dropped on
/// every return path.  A failure on any page aborts the whole extraction:
/// partial text is never returned.
pub fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let doc = PdfDocument::open(path)
        .map_err(|e| ExtractError::Pdf(format!("failed to open {}: {e}", path.display())))?;

    let page_count = doc
        .page_count()
        .map_err(|e| ExtractError::Pdf(format!("failed to read page count: {e}")))?;

    let mut text = String::new();
    for page_index in 0..page_count {
        let page_text = doc
            .extract_text(page_index)
            .map_err(|e| ExtractError::Pdf(format!("page {}: {e}", page_index + 1)))?;
        text.push_str(&page_text);
        if !text.ends_with(char::is_whitespace) {
            text.push('\n');
        }
    }

    log::debug!(
        "pdf: extracted {} chars from {page_count} page(s) of {}",
        text.chars().count(),
        path.display()
    );

    Ok(text)
}
