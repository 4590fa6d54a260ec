//! Conversion pipeline: request → worker thread → outcome notifications.
//!
//! # Architecture
//!
//! ```text
//! UI thread                                  worker thread "conversion"
//! ─────────                                  ──────────────────────────
//! ConversionRequest::new(path)
//! ConversionPipeline::spawn ───────────────▶ run(request, &notifier)
//!                                              extract → synthesize → inspect
//! rx.try_recv() each frame ◀── Status ──────
//!                          ◀── Finished ────
//!                          ◀── Ready ───────   (ReadyGuard drop)
//! PipelineState::apply(..)
//! ```
//!
//! UI-visible state lives on the UI thread only; the worker just sends
//! [`Notification`]s.

pub mod notify;
pub mod outcome;
pub mod request;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use notify::{Notification, Notifier, ReadyGuard};
pub use outcome::{AudioArtifact, ConversionError, ConversionOutcome, ErrorKind};
pub use request::{audio_output_path, ConversionRequest, AUDIO_EXTENSION, AUDIO_SUFFIX};
pub use runner::{ConversionPipeline, CONVERTING_STATUS};
pub use state::PipelineState;
