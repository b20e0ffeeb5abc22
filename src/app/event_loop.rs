use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::capture::{CrosstermCapture, InputCapture};
use crate::app::{App, Message, Model, ToastLevel, update};
use crate::slides::SlideDeck;
use crate::ui::slide_content_width;
use crate::watcher::DeckWatcher;

/// Frame interval while a transition is animating.
const ANIMATION_POLL_MS: u64 = 16;
const IDLE_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the presenter until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be loaded, the start slide is out
    /// of range, or the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; lectern requires an interactive terminal")?;
        let result = self.present(&mut terminal);
        ratatui::restore();
        result
    }

    fn present(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        let width = slide_content_width(size.width, self.fullscreen);
        let slides = SlideDeck::load(&self.file_path, width)?;
        let mut model = Model::new(slides, self.start_slide, (size.width, size.height))?;
        model.fullscreen = self.fullscreen;
        model.set_transition_ms(self.transition_ms);
        model.palette = self.palette;
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        tracing::info!(
            path = %self.file_path.display(),
            slides = model.deck.slide_count(),
            start = self.start_slide,
            "present.start"
        );

        let _capture = InputCapture::acquire(CrosstermCapture)?;
        Self::event_loop(terminal, &mut model)
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut deck_watcher = if model.watch_enabled {
            match Self::make_deck_watcher(&model.file_path) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    tracing::warn!(path = %model.file_path.display(), %err, "watcher.error");
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    None
                }
            }
        } else {
            None
        };
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms();
            let was_animating = model.transition.is_animating();
            let had_toast = model.active_toast().is_some();
            *model = update(std::mem::take(model), Message::Tick(now_ms));
            if was_animating || had_toast != model.active_toast().is_some() {
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "event.resize.apply");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && deck_watcher
                    .as_mut()
                    .is_some_and(DeckWatcher::take_change_ready)
            {
                *model = update(std::mem::take(model), Message::FileChanged);
                Self::handle_message_side_effects(model, &mut deck_watcher, &Message::FileChanged);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }
            if model.should_quit {
                break;
            }

            let poll_ms = if model.transition.is_animating() {
                ANIMATION_POLL_MS
            } else if resize_debouncer.is_pending() {
                10
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Drain the whole burst (key repeat, wheel) before the next frame.
                loop {
                    let event_ms = elapsed_ms();
                    *model = update(std::mem::take(model), Message::Tick(event_ms));
                    let msg =
                        Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        tracing::trace!(?msg, "event.message");
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &mut deck_watcher, &side_msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        tracing::info!(slide = model.deck.current_index(), "present.quit");
        Ok(())
    }
}
