//! Conversion pipeline: Extract → Synthesize → Inspect on a worker thread.
//!
//! [`ConversionPipeline`] owns the synthesizer and runs one request at a
//! time.  It never touches UI state: everything it has to say goes through a
//! [`Notifier`].
//!
//! # Run flow
//!
//! ```text
//! spawn(request)  ──▶ thread "conversion"
//!   ReadyGuard armed
//!   Status("Converting file to audio... Please wait.")
//!   extract(path, format)        ──err──┐
//!   synthesize(text, "en", out)  ──err──┤
//!   inspect(out)                 ──err──┤
//!   Finished(Success)                   └─▶ Finished(Failure{kind, message})
//!   ReadyGuard dropped ──▶ Ready
//! ```
//!
//! The first failing stage aborts the rest and nothing is retried.  A panic
//! inside a stage is caught and reported as [`ErrorKind::Internal`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use talky_files::config::TtsConfig;
//! use talky_files::pipeline::{notify, ConversionPipeline, ConversionRequest};
//! use talky_files::tts::{GoogleTranslateTts, Synthesizer};
//!
//! let backend = Arc::new(GoogleTranslateTts::from_config(&TtsConfig::default()));
//! let pipeline = Arc::new(ConversionPipeline::new(Synthesizer::new(backend)));
//!
//! let (notifier, mut rx) = notify::channel();
//! let handle = pipeline
//!     .spawn(ConversionRequest::new("report.txt"), notifier)
//!     .unwrap();
//! let outcome = handle.join().unwrap();
//! println!("{outcome:?}");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::audio;
use crate::extract;
use crate::tts::{Synthesizer, DEFAULT_LOCALE};

use super::notify::Notifier;
use super::outcome::{AudioArtifact, ConversionError, ConversionOutcome};
use super::request::ConversionRequest;

/// Status text posted when a run starts.
pub const CONVERTING_STATUS: &str = "Converting file to audio... Please wait.";

// ---------------------------------------------------------------------------
// ConversionPipeline
// ---------------------------------------------------------------------------

/// Drives a single document through extraction, synthesis and inspection.
pub struct ConversionPipeline {
    synthesizer: Synthesizer,
    locale: String,
}

impl ConversionPipeline {
    pub fn new(synthesizer: Synthesizer) -> Self {
        Self {
            synthesizer,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Run the three stages for `request`, stopping at the first failure.
    pub fn convert(&self, request: &ConversionRequest) -> Result<AudioArtifact, ConversionError> {
        let text = extract::extract(request.source_path(), request.declared_format())?;
        log::debug!(
            "pipeline: extracted {} char(s) from {}",
            text.content().chars().count(),
            request.source_path().display()
        );

        let output = request.output_path();
        self.synthesizer
            .synthesize(text.content(), &self.locale, &output)?;
        log::debug!("pipeline: synthesized {}", output.display());

        let duration_seconds = audio::inspect(&output)?;

        Ok(AudioArtifact {
            path: output,
            duration_seconds,
        })
    }

    /// Run `request` to completion on the calling thread.
    ///
    /// Posts the status text, then exactly one terminal outcome, then the
    /// ready signal.  The outcome is also returned.
    pub fn run(&self, request: ConversionRequest, notifier: &Notifier) -> ConversionOutcome {
        let _ready = notifier.ready_guard();
        notifier.status(CONVERTING_STATUS);

        log::info!(
            "pipeline: converting {} ({})",
            request.source_path().display(),
            request.declared_format()
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.convert(&request)))
            .unwrap_or_else(|payload| Err(ConversionError::Internal(panic_message(&*payload))));

        let outcome = match result {
            Ok(artifact) => {
                log::info!(
                    "pipeline: wrote {} ({:.2}s)",
                    artifact.path.display(),
                    artifact.duration_seconds
                );
                ConversionOutcome::Success {
                    artifact,
                    source_format: request.declared_format().clone(),
                }
            }
            Err(e) => {
                log::error!("pipeline: conversion failed ({}): {e}", e.kind());
                ConversionOutcome::from(e)
            }
        };

        notifier.finished(outcome.clone());
        outcome
    }

    /// Start a dedicated worker thread for `request`.
    ///
    /// The caller is responsible for not starting a second run while one is
    /// in flight.
    pub fn spawn(
        self: &Arc<Self>,
        request: ConversionRequest,
        notifier: Notifier,
    ) -> std::io::Result<JoinHandle<ConversionOutcome>> {
        let pipeline = Arc::clone(self);
        std::thread::Builder::new()
            .name("conversion".into())
            .spawn(move || pipeline.run(request, &notifier))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "conversion worker panicked".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
