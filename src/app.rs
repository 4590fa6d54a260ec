//! TalkyFiles window: egui/eframe application.
//!
//! # Architecture
//!
//! [`TalkyApp`] is the top-level [`eframe::App`].  It owns:
//!
//! * a [`ConversionPanel`]: every piece of UI-visible state;
//! * the shared [`ConversionPipeline`] it spawns runs on;
//! * a [`Notifier`] cloned into each run, and the receiving end of its
//!   channel, drained with `try_recv` every frame.
//!
//! Only this thread mutates the panel.  Workers talk to it exclusively
//! through notifications.
//!
//! # Layout
//!
//! | Row | Content |
//! |-----|---------|
//! | status | progress / result text, green or red for 3 s after a run |
//! | Selected File | file name of the current request |
//! | input | "Select File" button (disabled while busy) |
//! | Audio Output | `<stem>_audio.mp3` or `N/A` |
//! | Estimated Runtime | `12.34 seconds (0.2 minutes)` or `N/A` |
//!
//! "Select File" opens a native file dialog filtered to the supported
//! document types.  Dropping a document onto the window is the same as
//! picking it in the dialog.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::pipeline::{
    ConversionOutcome, ConversionPipeline, ConversionRequest, Notification, Notifier,
    PipelineState,
};

pub const WINDOW_TITLE: &str = "TalkyFiles";

const INITIAL_STATUS: &str = "Select a PDF, Text, or Word file to convert.";
const SELECTED_STATUS: &str = "File selected. Starting conversion...";
const CANCELLED_STATUS: &str = "File selection cancelled. Select a file to convert.";
const SUCCESS_STATUS: &str = "Conversion Complete! Your audio file is ready.";
const NO_FILE: &str = "No file selected";
const NOT_APPLICABLE: &str = "N/A";

/// How long the status line stays tinted after a run.
const TINT_DURATION: Duration = Duration::from_secs(3);

/// `(label, extensions)` filters offered by the file dialog, in order.
const DIALOG_FILTERS: &[(&str, &[&str])] = &[
    ("PDF files", &["pdf"]),
    ("Text files", &["txt"]),
    ("Word Documents", &["doc", "docx"]),
    ("All supported files", &["pdf", "txt", "doc", "docx"]),
];

// ---------------------------------------------------------------------------
// ConversionPanel (UI-side state)
// ---------------------------------------------------------------------------

/// Colour applied to the status line after a run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Success,
    Failure,
}

impl Tint {
    fn color(self) -> egui::Color32 {
        match self {
            Tint::Success => egui::Color32::from_rgb(80, 200, 120),
            Tint::Failure => egui::Color32::from_rgb(230, 80, 80),
        }
    }
}

/// Everything the window displays, plus the pipeline phase that gates the
/// trigger control.
#[derive(Debug, Clone)]
pub struct ConversionPanel {
    pub state: PipelineState,
    pub status: String,
    pub selected_file: String,
    pub file_type: String,
    pub audio_output: String,
    pub runtime: String,
    tint: Option<(Tint, Instant)>,
}

impl Default for ConversionPanel {
    fn default() -> Self {
        Self {
            state: PipelineState::Idle,
            status: INITIAL_STATUS.into(),
            selected_file: NO_FILE.into(),
            file_type: String::new(),
            audio_output: String::new(),
            runtime: String::new(),
            tint: None,
        }
    }
}

impl ConversionPanel {
    /// Whether the "Select File" control accepts input.
    pub fn trigger_enabled(&self) -> bool {
        !self.state.is_busy()
    }

    /// Handle a file selection.
    ///
    /// `picked` is `None` when the dialog was dismissed.  Returns the request
    /// to hand to the pipeline, or `None` when the selection was cancelled or
    /// a run is already in flight.
    pub fn select(&mut self, picked: Option<PathBuf>) -> Option<ConversionRequest> {
        if self.state.is_busy() {
            log::debug!("app: selection ignored while a conversion is running");
            return None;
        }

        let Some(path) = picked else {
            self.status = CANCELLED_STATUS.into();
            self.selected_file = NO_FILE.into();
            return None;
        };

        let request = ConversionRequest::new(path);
        self.selected_file = display_name(request.source_path());
        self.file_type.clear();
        self.audio_output.clear();
        self.runtime.clear();
        self.tint = None;
        self.status = SELECTED_STATUS.into();
        self.state = self.state.start();

        Some(request)
    }

    /// Apply one notification from the worker.
    pub fn apply(&mut self, notification: Notification, now: Instant) {
        self.state = self.state.apply(&notification);

        match notification {
            Notification::Status(text) => self.status = text,
            Notification::Finished(ConversionOutcome::Success {
                artifact,
                source_format,
            }) => {
                self.status = SUCCESS_STATUS.into();
                self.file_type = source_format.display_name().into();
                self.audio_output = artifact.file_name();
                self.runtime = artifact.runtime_text();
                self.tint = Some((Tint::Success, now));
            }
            Notification::Finished(ConversionOutcome::Failure { message, .. }) => {
                self.show_failure(&message, now);
            }
            Notification::Ready => {}
        }
    }

    /// The worker thread could not be started at all.
    pub fn start_failed(&mut self, err: &std::io::Error, now: Instant) {
        log::error!("app: could not start conversion worker: {err}");
        self.show_failure(&format!("could not start conversion: {err}"), now);
        self.state = PipelineState::Idle;
    }

    /// Drop the status tint once it has been shown for [`TINT_DURATION`].
    pub fn expire_tint(&mut self, now: Instant) {
        if let Some((_, since)) = self.tint {
            if now.duration_since(since) >= TINT_DURATION {
                self.tint = None;
            }
        }
    }

    pub fn tint(&self) -> Option<Tint> {
        self.tint.map(|(tint, _)| tint)
    }

    fn show_failure(&mut self, message: &str, now: Instant) {
        self.status = format!("Conversion Failed: {message}");
        self.file_type.clear();
        self.audio_output = NOT_APPLICABLE.into();
        self.runtime = NOT_APPLICABLE.into();
        self.tint = Some((Tint::Failure, now));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// TalkyApp
// ---------------------------------------------------------------------------

/// eframe application: the document-to-audio window.
pub struct TalkyApp {
    panel: ConversionPanel,

    pipeline: Arc<ConversionPipeline>,
    notifier: Notifier,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl TalkyApp {
    /// * `pipeline`:      shared pipeline each run is spawned on.
    /// * `notifier`:      cloned into every run.
    /// * `notifications`: receiving end of `notifier`'s channel.
    pub fn new(
        pipeline: Arc<ConversionPipeline>,
        notifier: Notifier,
        notifications: mpsc::UnboundedReceiver<Notification>,
    ) -> Self {
        Self {
            panel: ConversionPanel::default(),
            pipeline,
            notifier,
            notifications,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending notifications (non-blocking).
    fn poll_notifications(&mut self) {
        let now = Instant::now();
        while let Ok(notification) = self.notifications.try_recv() {
            self.panel.apply(notification, now);
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Start a conversion for `picked` if the panel accepts it.
    fn start(&mut self, picked: Option<PathBuf>) {
        let Some(request) = self.panel.select(picked) else {
            return;
        };

        if let Err(e) = self.pipeline.spawn(request, self.notifier.clone()) {
            self.panel.start_failed(&e, Instant::now());
        }
    }

    /// Show the native open dialog and block until it is closed.
    fn pick_document() -> Option<PathBuf> {
        DIALOG_FILTERS
            .iter()
            .fold(rfd::FileDialog::new(), |dialog, (name, extensions)| {
                dialog.add_filter(*name, *extensions)
            })
            .set_title("Select a document")
            .pick_file()
    }

    /// First dropped file path this frame, if any.
    fn dropped_file(ctx: &egui::Context) -> Option<PathBuf> {
        ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()))
    }

    // ── Rendering ────────────────────────────────────────────────────────

    fn draw_status(&self, ui: &mut egui::Ui) {
        let mut text = egui::RichText::new(self.panel.status.as_str()).size(14.0);
        if let Some(tint) = self.panel.tint() {
            text = text.color(tint.color());
        }
        ui.vertical_centered(|ui| {
            ui.add(egui::Label::new(text).wrap());
            if self.panel.state == PipelineState::Running {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(self.panel.state.label());
                });
            }
        });
    }

    fn draw_input(&mut self, ui: &mut egui::Ui) {
        let enabled = self.panel.trigger_enabled();

        let clicked = ui
            .vertical_centered(|ui| {
                ui.add_enabled(
                    enabled,
                    egui::Button::new("Select File").min_size(egui::vec2(160.0, 32.0)),
                )
                .on_hover_text("PDF, Text or Word document, or drop one on the window")
                .clicked()
            })
            .inner;

        if clicked {
            self.start(Self::pick_document());
        }
    }

    fn draw_details(&self, ui: &mut egui::Ui) {
        egui::Grid::new("conversion_details")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Selected File:");
                ui.label(
                    egui::RichText::new(self.panel.selected_file.as_str())
                        .italics()
                        .color(egui::Color32::GRAY),
                );
                ui.end_row();

                if !self.panel.file_type.is_empty() {
                    ui.label("File Type:");
                    ui.label(self.panel.file_type.as_str());
                    ui.end_row();
                }

                ui.label("Audio Output:");
                ui.label(egui::RichText::new(self.panel.audio_output.as_str()).strong());
                ui.end_row();

                ui.label("Estimated Runtime:");
                ui.label(self.panel.runtime.as_str());
                ui.end_row();
            });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TalkyApp {
    /// Called every frame by eframe.  Polls the channel, handles drops,
    /// advances the tint timer, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_notifications();

        if let Some(path) = Self::dropped_file(ctx) {
            self.start(Some(path));
        }

        self.panel.expire_tint(Instant::now());
        if self.panel.tint().is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            self.draw_status(ui);
            ui.add_space(8.0);
            ui.separator();

            if hovering && self.panel.trigger_enabled() {
                ui.vertical_centered(|ui| ui.label("Drop the file to convert it"));
            }

            self.draw_input(ui);
            ui.add_space(8.0);
            self.draw_details(ui);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
