//! A single conversion request and the output naming rule.

use std::path::{Path, PathBuf};

use crate::extract::DocumentFormat;

/// Appended to the source file's stem to name the audio output.
pub const AUDIO_SUFFIX: &str = "_audio";
/// Extension of the synthesized audio.
pub const AUDIO_EXTENSION: &str = "mp3";

/// One user-selected document, with its format fixed at creation time.
///
/// Immutable; moved into the worker that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source_path: PathBuf,
    declared_format: DocumentFormat,
}

impl ConversionRequest {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let declared_format = DocumentFormat::from_path(&source_path);
        Self {
            source_path,
            declared_format,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn declared_format(&self) -> &DocumentFormat {
        &self.declared_format
    }

    /// Where the audio for this request is written.
    pub fn output_path(&self) -> PathBuf {
        audio_output_path(&self.source_path)
    }
}

/// `<dir>/<stem>_audio.mp3` for a source at `<dir>/<stem>.<ext>`.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use talky_files::pipeline::audio_output_path;
///
/// assert_eq!(
///     audio_output_path(Path::new("/docs/report.txt")),
///     PathBuf::from("/docs/report_audio.mp3")
/// );
/// ```
pub fn audio_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{AUDIO_SUFFIX}.{AUDIO_EXTENSION}"))
}
