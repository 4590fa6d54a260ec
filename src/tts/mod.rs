//! Text-to-speech: the backend seam, the Google Translate backend and the
//! synthesizer the pipeline calls.

pub mod backend;
pub mod chunk;
pub mod google;
pub mod synthesizer;

pub use backend::{SpeechBackend, TtsError};
pub use google::GoogleTranslateTts;
pub use synthesizer::Synthesizer;

#[cfg(test)]
pub use backend::MockBackend;

/// The only locale the application speaks in.
pub const DEFAULT_LOCALE: &str = "en";
