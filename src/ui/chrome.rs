//! Navigation chrome around the slide frame.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::theme::Palette;

use super::layout::{
    Controls, FULLSCREEN_LABEL, HINT, HOME_LABEL, NEXT_LABEL, PREV_LABEL, counter_label,
};

/// Filled cells of a progress bar `width` columns wide.
pub(super) fn progress_cells(percent: f64, width: u16) -> u16 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (f64::from(width) * percent / 100.0).round() as u16;
    filled.min(width)
}

pub(super) fn render_progress(model: &Model, frame: &mut Frame, area: Rect) {
    let filled = progress_cells(model.deck.progress_percent(), area.width);
    let bar = Line::from(vec![
        Span::styled(
            "━".repeat(usize::from(filled)),
            Style::default().fg(model.palette.primary),
        ),
        Span::styled(
            "─".repeat(usize::from(area.width - filled)),
            Style::default().fg(model.palette.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(bar), area);
}

pub(super) fn render_hint(palette: &Palette, frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::styled(
        HINT,
        Style::default()
            .fg(palette.text_muted)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, area);
}

pub(super) fn render_controls(model: &Model, frame: &mut Frame, controls: &Controls) {
    let palette = &model.palette;
    let active = Style::default()
        .fg(palette.primary)
        .add_modifier(Modifier::BOLD);
    let disabled = Style::default()
        .fg(palette.text_muted)
        .add_modifier(Modifier::DIM);

    let buttons = [
        (controls.home, HOME_LABEL, active),
        (
            controls.prev,
            PREV_LABEL,
            if model.deck.is_first() { disabled } else { active },
        ),
        (
            controls.next,
            NEXT_LABEL,
            if model.deck.is_last() { disabled } else { active },
        ),
        (controls.fullscreen, FULLSCREEN_LABEL, active),
    ];
    for (rect, label, style) in buttons {
        frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
    }

    let counter = counter_label(model.deck.current_index(), model.deck.slide_count());
    frame.render_widget(
        Paragraph::new(Span::styled(counter, Style::default().fg(palette.text)))
            .alignment(Alignment::Center),
        controls.counter,
    );
}

pub(super) fn render_dots(model: &Model, frame: &mut Frame, dots: &[Rect]) {
    let current = model.deck.current_index();
    for (idx, rect) in dots.iter().enumerate() {
        let (symbol, color) = if idx == current {
            ("●", model.palette.primary)
        } else {
            ("○", model.palette.text_muted)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(symbol, Style::default().fg(color))),
            *rect,
        );
    }
}
