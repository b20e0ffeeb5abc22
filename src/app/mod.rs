//! Presenter state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete presenter state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

pub mod capture;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use capture::{CaptureControl, CrosstermCapture, InputCapture};
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::deck::DEFAULT_TRANSITION_MS;
use crate::theme::Palette;

/// Owns the startup options and runs the presenter.
pub struct App {
    file_path: PathBuf,
    watch_enabled: bool,
    fullscreen: bool,
    transition_ms: u64,
    start_slide: usize,
    palette: Palette,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a presenter for the given deck file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            watch_enabled: false,
            fullscreen: false,
            transition_ms: DEFAULT_TRANSITION_MS,
            start_slide: 0,
            palette: Palette::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable live reload.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Start in fullscreen.
    pub const fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Full exit-plus-enter length; zero turns transitions off.
    pub const fn with_transition_ms(mut self, duration_ms: u64) -> Self {
        self.transition_ms = duration_ms;
        self
    }

    /// Zero-based slide to open on.
    pub const fn with_start_slide(mut self, index: usize) -> Self {
        self.start_slide = index;
        self
    }

    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
