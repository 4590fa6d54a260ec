//! Text extraction: turns a document on disk into plain text.
//!
//! # Dispatch
//!
//! ```text
//! DocumentFormat::Pdf             → pdf::extract_pdf     (pdf_oxide, page order)
//! DocumentFormat::Text            → plain::read_text     (UTF-8)
//! DocumentFormat::Word            → word::extract_docx   (OOXML body text)
//! DocumentFormat::Unsupported(_)  → ExtractError::UnsupportedFormat
//!                                   │
//!                                   ▼
//!                      ExtractedText::new  (trim, reject empty)
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use talky_files::extract::{extract, DocumentFormat};
//!
//! let path = std::path::Path::new("report.pdf");
//! let text = extract(path, &DocumentFormat::from_path(path)).unwrap();
//! println!("{}", text.content());
//! ```

pub mod format;
pub mod pdf;
pub mod plain;
pub mod word;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use format::DocumentFormat;

use crate::pipeline::ErrorKind;

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// All errors that can arise while extracting text from a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No extraction strategy exists for the file's extension.
    #[error("Unsupported file type '.{0}'. Please select a PDF, TXT, or Word file.")]
    UnsupportedFormat(String),

    /// The file could not be read from disk.
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF reader rejected the document or one of its pages.
    #[error("could not read PDF: {0}")]
    Pdf(String),

    /// The Word package is malformed or is not an OOXML package.
    #[error("could not read Word document: {0}")]
    Word(String),

    /// A text file is not valid UTF-8.
    #[error("text file is not valid UTF-8: {0}")]
    Encoding(String),

    /// Extraction succeeded but produced no text after trimming.
    #[error("No readable text found in the selected file.")]
    EmptyDocument,
}

impl ExtractError {
    /// Map onto the pipeline's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ExtractError::EmptyDocument => ErrorKind::EmptyDocument,
            ExtractError::Read { .. }
            | ExtractError::Pdf(_)
            | ExtractError::Word(_)
            | ExtractError::Encoding(_) => ErrorKind::ExtractionFailure,
        }
    }
}

// ---------------------------------------------------------------------------
// ExtractedText
// ---------------------------------------------------------------------------

/// Non-empty, trimmed document text.
///
/// The only constructor is [`ExtractedText::new`], so holding a value proves
/// the text is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    content: String,
}

impl ExtractedText {
    /// Trim `raw` and wrap it, or fail with [`ExtractError::EmptyDocument`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ExtractError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

/// Extract the text of `path` using the strategy for `format`.
///
/// Unsupported formats fail before the filesystem is touched.  Every branch
/// shares the same post-condition: the result is trimmed and must be
/// non-empty.
pub fn extract(path: &Path, format: &DocumentFormat) -> Result<ExtractedText, ExtractError> {
    let raw = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(path)?,
        DocumentFormat::Text => plain::read_text(path)?,
        DocumentFormat::Word => word::extract_docx(path)?,
        DocumentFormat::Unsupported(ext) => {
            return Err(ExtractError::UnsupportedFormat(ext.clone()));
        }
    };

    log::debug!(
        "extract: {} produced {} chars from {}",
        format,
        raw.chars().count(),
        path.display()
    );

    ExtractedText::new(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
