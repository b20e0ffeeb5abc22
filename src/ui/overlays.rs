use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::app::Model;

const KEY_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Right/Down/Space/l/j/n", "Next slide"),
            ("Left/Up/Backspace/h/k/p", "Previous slide"),
            ("PageDown / PageUp", "Next / previous slide"),
            ("Home/g  End/G", "First / last slide"),
            ("12 Enter", "Go to slide 12"),
            ("Esc", "Cancel slide number"),
        ],
    ),
    (
        "Mouse",
        &[
            ("[⌂] [◀] [▶]", "First / previous / next"),
            ("[⛶]", "Fullscreen"),
            ("Dots", "Go to that slide"),
            ("Wheel", "Next / previous slide"),
        ],
    ),
    (
        "Display",
        &[
            ("f", "Toggle fullscreen"),
            ("? / F1", "Toggle help"),
        ],
    ),
    (
        "Other",
        &[
            ("w", "Toggle watch"),
            ("r", "Reload deck"),
            ("q / Ctrl-c", "Quit"),
        ],
    ),
];

pub fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let palette = &model.palette;
    let section_style = Style::default()
        .fg(palette.primary)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(palette.secondary);

    let mut lines = Vec::new();
    for (section, keys) in KEY_SECTIONS {
        lines.push(Line::styled(*section, section_style));
        for (key, action) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<26}"), key_style),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines
}

/// Popup and text area of the help overlay inside `area`.
fn help_geometry(area: Rect) -> (Rect, Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);
    // border + padding on each side
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );
    (popup, inner)
}

/// Largest useful scroll offset for the help overlay on the model's terminal.
pub fn help_max_scroll(model: &Model) -> usize {
    let (width, height) = model.terminal_size;
    let (_, inner) = help_geometry(Rect::new(0, 0, width, height));
    // last row holds the footer
    let content_height = usize::from(inner.height.saturating_sub(1));
    help_lines(model).len().saturating_sub(content_height)
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let (popup, inner) = help_geometry(area);
    let palette = &model.palette;

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(" Help ")
        .padding(Padding::uniform(1))
        .style(Style::default().bg(palette.surface).fg(palette.text));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let all_lines = help_lines(model);
    // last row holds the footer
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = usize::from(content_height_u16);
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);
    let end = (scroll + content_height).min(all_lines.len());

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(all_lines[scroll..end].to_vec()), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled(
        "j/k scroll \u{2502} any other key closes",
        Style::default().fg(palette.text_muted),
    );
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
