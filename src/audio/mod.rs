//! Audio inspection: reads the playback length of a synthesized file.
//!
//! The pipeline calls [`inspect`] once the synthesizer has written its MP3.
//! A failure here is reported separately from synthesis failures, even though
//! the file was written a moment earlier.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use talky_files::audio::inspect;
//!
//! let secs = inspect(Path::new("report_audio.mp3")).unwrap();
//! println!("{secs:.2} seconds");
//! ```

pub mod duration;

pub use duration::{inspect, InspectError};
