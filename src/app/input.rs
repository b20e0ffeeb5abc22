use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::ui::HitTarget;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "event.resize.queue");
                resize_debouncer.queue(*width, *height, now_ms);
                Some(Message::SizeChanged(*width, *height))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c')) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(match key.code {
                KeyCode::Char('j') | KeyCode::Down => Message::HelpScrollDown,
                KeyCode::Char('k') | KeyCode::Up => Message::HelpScrollUp,
                _ => Message::HideHelp,
            });
        }

        if model.jump_input.is_some() {
            return match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => Some(Message::JumpInput(c)),
                KeyCode::Backspace => Some(Message::JumpBackspace),
                KeyCode::Enter => Some(Message::JumpSubmit),
                KeyCode::Esc => Some(Message::JumpCancel),
                _ => None,
            };
        }

        if ctrl {
            return None;
        }
        match key.code {
            KeyCode::Right
            | KeyCode::Down
            | KeyCode::PageDown
            | KeyCode::Char(' ' | 'l' | 'j' | 'n') => Some(Message::Advance),
            KeyCode::Left
            | KeyCode::Up
            | KeyCode::PageUp
            | KeyCode::Backspace
            | KeyCode::Char('h' | 'k' | 'p') => Some(Message::Retreat),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::Home),
            KeyCode::End | KeyCode::Char('G') => Some(Message::Last),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Message::JumpInput(c)),
            KeyCode::Char('f') => Some(Message::ToggleFullscreen),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('r') => Some(Message::ForceReload),
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        let target = model.shell_layout().hit(mouse.column, mouse.row)?;
        match (mouse.kind, target) {
            (MouseEventKind::Up(MouseButton::Left), HitTarget::Home) => Some(Message::Home),
            (MouseEventKind::Up(MouseButton::Left), HitTarget::Prev) => Some(Message::Retreat),
            (MouseEventKind::Up(MouseButton::Left), HitTarget::Next) => Some(Message::Advance),
            (MouseEventKind::Up(MouseButton::Left), HitTarget::Fullscreen) => {
                Some(Message::ToggleFullscreen)
            }
            (MouseEventKind::Up(MouseButton::Left), HitTarget::Dot(index)) => {
                Some(Message::GoTo(index))
            }
            (MouseEventKind::ScrollDown, HitTarget::Slide) => Some(Message::Advance),
            (MouseEventKind::ScrollUp, HitTarget::Slide) => Some(Message::Retreat),
            _ => None,
        }
    }
}
