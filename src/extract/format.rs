//! Declared document format, derived from a file's extension.

use std::fmt;
use std::path::Path;

/// The extraction strategy a file is routed to.
///
/// The set is closed: adding a format means adding a variant here and a match
/// arm in [`crate::extract::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Portable Document Format (`.pdf`).
    Pdf,
    /// Plain text (`.txt`).
    Text,
    /// Word document (`.doc`, `.docx`).
    Word,
    /// Any other extension.  Holds the lower-cased extension (empty when the
    /// file has none).
    Unsupported(String),
}

impl DocumentFormat {
    /// Classify `path` by its extension, case-insensitively.
    ///
    /// ```
    /// use talky_files::extract::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path("Report.PDF"), DocumentFormat::Pdf);
    /// assert_eq!(DocumentFormat::from_path("notes.txt"), DocumentFormat::Text);
    /// assert_eq!(DocumentFormat::from_path("letter.docx"), DocumentFormat::Word);
    /// assert_eq!(
    ///     DocumentFormat::from_path("notes.xyz"),
    ///     DocumentFormat::Unsupported("xyz".into())
    /// );
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Self::Pdf,
            "txt" => Self::Text,
            "doc" | "docx" => Self::Word,
            _ => Self::Unsupported(ext),
        }
    }

    /// Human-readable name shown in the UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Text => "Text File",
            Self::Word => "Word Document",
            Self::Unsupported(_) => "Unsupported File",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
