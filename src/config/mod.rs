//! Configuration module for TalkyFiles.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the speech
//! backend and the window, `AppPaths` for cross-platform config directories,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.
//!
//! Only the presentation shell reads configuration.  The conversion core
//! receives everything it needs as explicit arguments.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, TtsConfig, UiConfig};
