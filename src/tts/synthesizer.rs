//! Speech synthesizer: one backend call, one file write.

use std::path::Path;
use std::sync::Arc;

use super::backend::{SpeechBackend, TtsError};

/// Turns text into an audio file through a [`SpeechBackend`].
///
/// The synthesizer never looks at the text it is given: length limits and
/// chunking are the backend's business.  The output path always comes from
/// the caller.
#[derive(Clone)]
pub struct Synthesizer {
    backend: Arc<dyn SpeechBackend>,
}

impl Synthesizer {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self { backend }
    }

    /// Speak `text` in `locale` and write the audio to `output`.
    ///
    /// An existing file at `output` is overwritten.  When the backend fails
    /// nothing is written.
    pub fn synthesize(&self, text: &str, locale: &str, output: &Path) -> Result<(), TtsError> {
        let audio = self.backend.speak(text, locale)?;

        std::fs::write(output, &audio).map_err(|source| TtsError::Write {
            path: output.to_path_buf(),
            source,
        })?;

        log::debug!("tts: wrote {} bytes to {}", audio.len(), output.display());
        Ok(())
    }
}
