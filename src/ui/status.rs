use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub const WATCHING_LABEL: &str = "[watching]";

/// Bottom row: jump prompt, else toast, else the status bar.
pub fn render_status_row(model: &Model, frame: &mut Frame, area: Rect) {
    if model.jump_input.is_some() {
        render_jump_prompt(model, frame, area);
    } else if model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
    } else if !model.fullscreen {
        render_status_bar(model, frame, area);
    }
}

pub fn jump_prompt_text(input: &str) -> String {
    format!("Go to slide: {input}_")
}

fn render_jump_prompt(model: &Model, frame: &mut Frame, area: Rect) {
    let input = model.jump_input.as_deref().unwrap_or_default();
    let bar = Paragraph::new(format!(
        " {}  Enter: go  Esc: cancel",
        jump_prompt_text(input)
    ))
    .style(
        Style::default()
            .bg(model.palette.secondary)
            .fg(model.palette.surface),
    );
    frame.render_widget(bar, area);
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.file_name().map_or_else(
        || "untitled".to_string(),
        |s| s.to_string_lossy().to_string(),
    );
    let muted = Style::default().fg(model.palette.text_muted);
    let mut spans = vec![Span::styled(
        format!(" {filename}  [{:.0}%]", model.deck.progress_percent()),
        muted,
    )];
    if model.watch_enabled {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            WATCHING_LABEL,
            Style::default().fg(model.palette.success),
        ));
    }
    spans.push(Span::styled("  ?:help", muted));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let palette = &model.palette;
    let (prefix, bg) = match level {
        ToastLevel::Info => ("[info]", palette.info),
        ToastLevel::Warning => ("[warn]", palette.warning),
        ToastLevel::Error => ("[error]", palette.error),
    };
    let fg = match level {
        ToastLevel::Warning => Color::Black,
        ToastLevel::Info | ToastLevel::Error => Color::White,
    };
    let toast =
        Paragraph::new(format!("{prefix} {message}")).style(Style::default().bg(bg).fg(fg));
    frame.render_widget(toast, area);
}
