//! Pipeline state machine, as tracked by the interactive thread.

use super::notify::Notification;

/// Phase of the conversion pipeline.
///
/// ```text
/// Idle ──request──▶ Running ──success──▶ Succeeded ──ready──▶ Idle
///                           ──failure──▶ Failed    ──ready──▶ Idle
/// ```
///
/// The worker never touches this value; the UI advances it from the
/// notifications it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Waiting for a file selection.
    #[default]
    Idle,
    /// A worker is extracting, synthesizing or inspecting.
    Running,
    /// The last run produced audio; waiting for the ready signal.
    Succeeded,
    /// The last run failed; waiting for the ready signal.
    Failed,
}

impl PipelineState {
    /// `true` while a request is in flight.  The trigger control is disabled
    /// for as long as this holds.
    ///
    /// ```
    /// use talky_files::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Running.is_busy());
    /// assert!(PipelineState::Succeeded.is_busy());
    /// assert!(PipelineState::Failed.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        !matches!(self, PipelineState::Idle)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Running => "Converting",
            PipelineState::Succeeded => "Done",
            PipelineState::Failed => "Failed",
        }
    }

    /// The state after handing a request to the pipeline.
    pub fn start(self) -> Self {
        PipelineState::Running
    }

    /// The state after `notification` arrives.
    pub fn apply(self, notification: &Notification) -> Self {
        match notification {
            Notification::Status(_) => self,
            Notification::Finished(outcome) if outcome.is_success() => PipelineState::Succeeded,
            Notification::Finished(_) => PipelineState::Failed,
            Notification::Ready => PipelineState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DocumentFormat;
    use crate::pipeline::{AudioArtifact, ConversionOutcome, ErrorKind};

    fn success() -> Notification {
        Notification::Finished(ConversionOutcome::Success {
            artifact: AudioArtifact {
                path: "a_audio.mp3".into(),
                duration_seconds: 2.0,
            },
            source_format: DocumentFormat::Pdf,
        })
    }

    fn failure() -> Notification {
        Notification::Finished(ConversionOutcome::Failure {
            kind: ErrorKind::SynthesisFailure,
            message: "offline".into(),
        })
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    #[test]
    fn success_path_returns_to_idle() {
        let s = PipelineState::Idle.start();
        assert_eq!(s, PipelineState::Running);

        let s = s.apply(&Notification::Status("Converting".into()));
        assert_eq!(s, PipelineState::Running);

        let s = s.apply(&success());
        assert_eq!(s, PipelineState::Succeeded);
        assert!(s.is_busy());

        let s = s.apply(&Notification::Ready);
        assert_eq!(s, PipelineState::Idle);
        assert!(!s.is_busy());
    }

    #[test]
    fn failure_path_returns_to_idle() {
        let s = PipelineState::Running.apply(&failure());
        assert_eq!(s, PipelineState::Failed);
        assert_eq!(s.apply(&Notification::Ready), PipelineState::Idle);
    }

    #[test]
    fn labels() {
        assert_eq!(PipelineState::Idle.label(), "Idle");
        assert_eq!(PipelineState::Running.label(), "Converting");
        assert_eq!(PipelineState::Succeeded.label(), "Done");
        assert_eq!(PipelineState::Failed.label(), "Failed");
    }
}
