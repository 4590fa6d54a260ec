//! Container-level duration probing with symphonia.
//!
//! The duration comes from the default track's frame count and time base.
//! Streams that do not announce a frame count (plain MP3 without a Xing/Info
//! header) are walked packet by packet and the packet durations summed; no
//! audio is decoded either way.

use std::fs::File;
use std::path::{Path, PathBuf};

use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;
use thiserror::Error;

// ---------------------------------------------------------------------------
// InspectError
// ---------------------------------------------------------------------------

/// Reasons an audio file's duration could not be determined.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("could not open audio file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container format was not recognised or its header is unreadable.
    #[error("unreadable audio header: {0}")]
    Probe(String),

    #[error("audio file has no playable track")]
    NoTrack,

    #[error("audio track has neither a time base nor a sample rate")]
    UnknownSampleRate,

    /// Reading packets failed part-way through the stream.
    #[error("could not read audio stream: {0}")]
    Read(String),

    #[error("audio file contains no audio frames")]
    Empty,
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

/// Playback duration of the audio file at `path`, in fractional seconds.
pub fn inspect(path: &Path) -> Result<f64, InspectError> {
    let file = File::open(path).map_err(|source| InspectError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| InspectError::Probe(e.to_string()))?;

    let mut format = probed.format;

    let track = format.default_track().ok_or(InspectError::NoTrack)?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let time_base = params
        .time_base
        .or_else(|| params.sample_rate.map(|rate| TimeBase::new(1, rate)))
        .ok_or(InspectError::UnknownSampleRate)?;

    let frames = match params.n_frames {
        Some(n) if n > 0 => n,
        _ => count_frames(format.as_mut(), track_id)?,
    };

    if frames == 0 {
        return Err(InspectError::Empty);
    }

    let time = time_base.calc_time(frames);
    let seconds = time.seconds as f64 + time.frac;

    log::debug!(
        "audio: {} -> {frames} frame(s), {seconds:.3}s",
        path.display()
    );
    Ok(seconds)
}

/// Sum the durations of every packet belonging to `track_id`.
fn count_frames(format: &mut dyn FormatReader, track_id: u32) -> Result<u64, InspectError> {
    let mut frames = 0u64;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(InspectError::Read(e.to_string())),
        };

        if packet.track_id() == track_id {
            frames += packet.dur;
        }
    }

    Ok(frames)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
