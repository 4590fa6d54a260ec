//! Application entry point for TalkyFiles.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk.  On first run the defaults are written
//!    to `settings.toml` so they can be edited.
//! 3. Build the speech backend ([`GoogleTranslateTts`]) from config.
//! 4. Build the [`ConversionPipeline`] around it.
//! 5. Run [`eframe::run_native`]; the notification channel is created in
//!    the app creator so its waker can repaint the window.  Blocks the main
//!    thread until the window is closed.

use std::sync::Arc;

use eframe::egui;
use talky_files::{
    app::{TalkyApp, WINDOW_TITLE},
    config::{AppConfig, AppPaths},
    pipeline::{notify, ConversionPipeline},
    tts::{GoogleTranslateTts, SpeechBackend, Synthesizer},
};

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;

    let mut vp = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([width, height])
        .with_min_inner_size([width, height])
        .with_resizable(false)
        .with_drag_and_drop(true);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("TalkyFiles starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if !AppPaths::new().settings_file.exists() {
        match config.save() {
            Ok(()) => log::info!("Wrote default settings"),
            Err(e) => log::warn!("Could not write default settings: {e}"),
        }
    }

    // 3. Speech backend
    let backend: Arc<dyn SpeechBackend> = Arc::new(GoogleTranslateTts::from_config(&config.tts));
    log::info!("Speech backend: {}", config.tts.base_url);

    // 4. Pipeline
    let pipeline = Arc::new(ConversionPipeline::new(Synthesizer::new(backend)));

    // 5. Window
    let options = native_options(&config);

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let (notifier, notifications) = notify::channel_with_waker(move || ctx.request_repaint());
            Ok(Box::new(TalkyApp::new(pipeline, notifier, notifications)))
        }),
    )
}
