use crate::app::{Model, ToastLevel};

/// Longest jump the prompt accepts, in digits.
const MAX_JUMP_DIGITS: usize = 6;

/// All possible events and actions in the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Next slide, saturating at the last
    Advance,
    /// Previous slide, saturating at the first
    Retreat,
    /// Jump to a zero-based slide index
    GoTo(usize),
    /// First slide
    Home,
    /// Last slide
    Last,

    // Jump prompt
    /// Append a digit, opening the prompt if needed
    JumpInput(char),
    /// Delete the last typed digit
    JumpBackspace,
    /// Jump to the typed one-based slide number
    JumpSubmit,
    /// Close the prompt without moving
    JumpCancel,

    // Display
    ToggleFullscreen,
    ToggleHelp,
    HideHelp,
    HelpScrollUp,
    HelpScrollDown,

    // File watching
    /// Toggle file watching
    ToggleWatch,
    /// File changed externally, reload
    FileChanged,
    /// Force reload file
    ForceReload,

    // System
    /// Advance the clock to this many milliseconds since start
    Tick(u64),
    /// Terminal size changed; panels reflow once resizing settles
    SizeChanged(u16, u16),
    /// Terminal resized, reflow panels
    Resize(u16, u16),
    /// Quit application
    Quit,
}

/// Apply a message to the model and return the new model.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Advance => {
            if model.deck.advance() {
                model.sync_transition();
            }
        }
        Message::Retreat => {
            if model.deck.retreat() {
                model.sync_transition();
            }
        }
        Message::GoTo(index) => go_to(&mut model, index),
        Message::Home => {
            model.deck.home();
            model.sync_transition();
        }
        Message::Last => {
            model.deck.last();
            model.sync_transition();
        }

        Message::JumpInput(c) if c.is_ascii_digit() => {
            let input = model.jump_input.get_or_insert_with(String::new);
            if input.len() < MAX_JUMP_DIGITS {
                input.push(c);
            }
        }
        Message::JumpInput(_) => {}
        Message::JumpBackspace => {
            if let Some(input) = model.jump_input.as_mut() {
                input.pop();
            }
        }
        Message::JumpSubmit => {
            let input = model.jump_input.take().unwrap_or_default();
            match input.parse::<usize>() {
                Ok(number) if number > 0 => go_to(&mut model, number - 1),
                _ if input.is_empty() => {}
                _ => model.show_toast(
                    ToastLevel::Warning,
                    format!("No slide {input} (deck has {} slides)", model.deck.slide_count()),
                ),
            }
        }
        Message::JumpCancel => model.jump_input = None,

        Message::ToggleFullscreen => {
            model.fullscreen = !model.fullscreen;
            model.reflow_layout();
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => {
            model.help_visible = false;
            model.help_scroll_offset = 0;
        }
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            model.help_scroll_offset =
                (model.help_scroll_offset + 1).min(crate::ui::help_max_scroll(&model));
        }

        Message::ToggleWatch => model.watch_enabled = !model.watch_enabled,
        // Reloads happen in side effects
        Message::FileChanged | Message::ForceReload => {}

        Message::Tick(now_ms) => {
            model.now_ms = model.now_ms.max(now_ms);
            model.transition.tick(model.now_ms);
            model.expire_toast(model.now_ms);
        }
        Message::SizeChanged(width, height) => model.terminal_size = (width, height),
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.reflow_layout();
        }
        Message::Quit => model.should_quit = true,
    }
    model
}

fn go_to(model: &mut Model, index: usize) {
    match model.deck.goto(index) {
        Ok(()) => model.sync_transition(),
        Err(err) => model.show_toast(ToastLevel::Warning, err.to_string()),
    }
}
