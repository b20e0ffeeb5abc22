use std::path::PathBuf;

use anyhow::Result;
use ratatui::layout::Rect;

use crate::deck::{DEFAULT_TRANSITION_MS, Deck, DeckError, TransitionFrame, TransitionSequencer};
use crate::slides::{Slide, SlideDeck};
use crate::theme::Palette;
use crate::ui::{ShellLayout, slide_content_width};

const TOAST_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at_ms: u64,
}

/// The complete presenter state.
///
/// All state lives here; the event loop owns the only instance.
#[derive(Debug)]
pub struct Model {
    /// Navigation state, the single source of the current index
    pub deck: Deck,
    /// Rendered panels, one per slide
    pub slides: SlideDeck,
    /// Which panel is on screen and how far through its swap
    pub transition: TransitionSequencer,
    /// Full swap length handed to new sequencers
    pub transition_ms: u64,
    pub palette: Palette,
    /// Path to the deck file
    pub file_path: PathBuf,
    pub fullscreen: bool,
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    /// Digits typed for a jump, `None` when no prompt is open
    pub jump_input: Option<String>,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub terminal_size: (u16, u16),
    /// Milliseconds since the event loop started, advanced by ticks
    pub now_ms: u64,
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model showing `start_index` of `slides`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError`] when `start_index` is not a slide of `slides`.
    pub fn new(
        slides: SlideDeck,
        start_index: usize,
        terminal_size: (u16, u16),
    ) -> Result<Self, DeckError> {
        let deck = Deck::starting_at(slides.len(), start_index)?;
        Ok(Self {
            deck,
            file_path: slides.path().to_path_buf(),
            slides,
            transition: TransitionSequencer::new(start_index, DEFAULT_TRANSITION_MS),
            terminal_size,
            ..Self::default()
        })
    }

    /// Change the swap length, settling any swap in flight.
    pub fn set_transition_ms(&mut self, duration_ms: u64) {
        self.transition_ms = duration_ms;
        self.transition = TransitionSequencer::new(self.deck.current_index(), duration_ms);
    }

    /// What to draw right now.
    pub fn visible_frame(&self) -> TransitionFrame {
        self.transition.frame(self.now_ms)
    }

    pub fn visible_slide(&self) -> Option<&Slide> {
        self.slides.get(self.visible_frame().slide)
    }

    pub fn shell_layout(&self) -> ShellLayout {
        let (width, height) = self.terminal_size;
        ShellLayout::compute(
            Rect::new(0, 0, width, height),
            self.deck.slide_count(),
            self.deck.current_index(),
            self.fullscreen,
        )
    }

    /// Panel width for the current terminal and fullscreen state.
    pub const fn layout_width(&self) -> u16 {
        slide_content_width(self.terminal_size.0, self.fullscreen)
    }

    pub(super) fn reflow_layout(&mut self) {
        self.slides.relayout(self.layout_width());
    }

    /// Hand the deck's current index to the transition sequencer.
    pub(super) fn sync_transition(&mut self) {
        self.transition
            .request(self.deck.current_index(), self.now_ms);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at_ms: self.now_ms + TOAST_MS,
        });
    }

    pub(super) fn expire_toast(&mut self, now_ms: u64) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at_ms <= now_ms)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Re-read the deck file, keeping the position when it still exists.
    ///
    /// On failure the current deck stays on screen.
    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let slides = SlideDeck::load(&self.file_path, self.layout_width())?;
        let last = slides.len().saturating_sub(1);
        let index = self.deck.current_index().min(last);
        let deck = Deck::starting_at(slides.len(), index)?;
        if index != self.deck.current_index() {
            tracing::info!(from = self.deck.current_index(), to = index, "reload.clamped");
        }
        self.slides = slides;
        self.deck = deck;
        self.transition.settle_on(index);
        Ok(())
    }
}

// std::mem::take in the event loop needs a cheap placeholder.
impl Default for Model {
    fn default() -> Self {
        Self {
            deck: Deck::default(),
            slides: SlideDeck::placeholder(),
            transition: TransitionSequencer::new(0, DEFAULT_TRANSITION_MS),
            transition_ms: DEFAULT_TRANSITION_MS,
            palette: Palette::default(),
            file_path: PathBuf::new(),
            fullscreen: false,
            help_visible: false,
            help_scroll_offset: 0,
            jump_input: None,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            terminal_size: (80, 24),
            now_ms: 0,
            should_quit: false,
            toast: None,
        }
    }
}
