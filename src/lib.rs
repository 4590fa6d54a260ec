//! TalkyFiles: turns a PDF, text or Word document into an MP3 read aloud.
//!
//! ```text
//! extract ──▶ tts ──▶ audio
//!    ╲          │       ╱
//!     ╲─── pipeline ───╱ ──notifications──▶ app (egui)
//! ```

pub mod app;
pub mod audio;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod tts;

#[cfg(test)]
pub(crate) mod fixtures;
