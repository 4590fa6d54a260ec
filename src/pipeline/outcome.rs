//! Conversion results and the error taxonomy shown to the user.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::audio::InspectError;
use crate::extract::{DocumentFormat, ExtractError};
use crate::tts::TtsError;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Which stage of a conversion failed, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No extraction strategy for the file's extension.
    UnsupportedFormat,
    /// The document reader could not parse the file.
    ExtractionFailure,
    /// The document parsed but holds no usable text.
    EmptyDocument,
    /// The speech backend rejected the request or was unreachable.
    SynthesisFailure,
    /// The synthesized file could not be inspected.
    AudioReadFailure,
    /// A stage panicked.
    Internal,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "Unsupported format",
            ErrorKind::ExtractionFailure => "Extraction failure",
            ErrorKind::EmptyDocument => "Empty document",
            ErrorKind::SynthesisFailure => "Synthesis failure",
            ErrorKind::AudioReadFailure => "Audio read failure",
            ErrorKind::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ConversionError
// ---------------------------------------------------------------------------

/// Any failure inside a conversion run.
///
/// The `Display` text is what the user sees, so stage errors are forwarded
/// transparently.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Synthesis(#[from] TtsError),

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Extract(e) => e.kind(),
            ConversionError::Synthesis(_) => ErrorKind::SynthesisFailure,
            ConversionError::Inspect(_) => ErrorKind::AudioReadFailure,
            ConversionError::Internal(_) => ErrorKind::Internal,
        }
    }
}

// ---------------------------------------------------------------------------
// AudioArtifact / ConversionOutcome
// ---------------------------------------------------------------------------

/// The audio file a successful run leaves on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub duration_seconds: f64,
}

impl AudioArtifact {
    /// File name of the artifact, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// `"12.34 seconds (0.2 minutes)"`.
    pub fn runtime_text(&self) -> String {
        format!(
            "{:.2} seconds ({:.1} minutes)",
            self.duration_seconds,
            self.duration_seconds / 60.0
        )
    }
}

/// Terminal result of one conversion run.  Exactly one is produced per
/// request.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Success {
        artifact: AudioArtifact,
        source_format: DocumentFormat,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }

    /// The failure kind, or `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ConversionOutcome::Success { .. } => None,
            ConversionOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<ConversionError> for ConversionOutcome {
    fn from(err: ConversionError) -> Self {
        ConversionOutcome::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
