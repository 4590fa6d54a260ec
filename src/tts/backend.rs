//! Speech backend trait and its error type.
//!
//! [`SpeechBackend`] is the opaque capability the synthesizer consumes: text
//! and a locale in, encoded audio bytes out.  It is object-safe and
//! `Send + Sync` so it can be held behind an `Arc<dyn SpeechBackend>` and
//! called from the conversion worker thread.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// TtsError
// ---------------------------------------------------------------------------

/// Errors that can occur while synthesizing speech.
#[derive(Debug, Error)]
pub enum TtsError {
    /// HTTP transport or connection error.
    #[error("speech service request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("speech service returned HTTP {0}")]
    Status(u16),

    /// The response did not contain an audio payload.
    #[error("speech service response contained no audio")]
    NoAudio,

    /// The audio payload could not be decoded.
    #[error("could not decode speech audio: {0}")]
    Decode(String),

    /// The audio could not be written to its output path.
    #[error("failed to write audio to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => TtsError::Status(status.as_u16()),
            None => TtsError::Request(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechBackend trait
// ---------------------------------------------------------------------------

/// A blocking text-to-speech service.
///
/// # Contract
///
/// - `text` is handed over whole; any length limits of the underlying service
///   are the implementation's concern.
/// - On success returns the complete encoded audio (MP3 for the bundled
///   backend).
/// - Every failure, including network unavailability, is a [`TtsError`].
pub trait SpeechBackend: Send + Sync {
    fn speak(&self, text: &str, locale: &str) -> Result<Vec<u8>, TtsError>;
}

// Compile-time assertion: Box<dyn SpeechBackend> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechBackend>) {}
};

// ---------------------------------------------------------------------------
// MockBackend  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns canned audio (or a connection failure) and
/// records how it was called.
#[cfg(test)]
pub struct MockBackend {
    audio: Option<Vec<u8>>,
    calls: std::sync::atomic::AtomicUsize,
    last_request: std::sync::Mutex<Option<(String, String)>>,
}

#[cfg(test)]
impl MockBackend {
    /// A backend that always answers with `audio`.
    pub fn ok(audio: Vec<u8>) -> Self {
        Self {
            audio: Some(audio),
            calls: Default::default(),
            last_request: Default::default(),
        }
    }

    /// A backend that always fails as if the service were unreachable.
    pub fn unreachable() -> Self {
        Self {
            audio: None,
            calls: Default::default(),
            last_request: Default::default(),
        }
    }

    /// Number of `speak` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// `(text, locale)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SpeechBackend for MockBackend {
    fn speak(&self, text: &str, locale: &str) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((text.to_string(), locale.to_string()));
        self.audio
            .clone()
            .ok_or_else(|| TtsError::Request("connection refused".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
