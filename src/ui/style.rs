//! Line and span styling for slide panels.
//!
//! Colors come from the [`Palette`] handed down by the renderer; syntax
//! colors are downgraded to the xterm cube when the terminal lacks truecolor.

use ratatui::style::{Color, Modifier, Style};

use crate::slides::{InlineColor, InlineStyle, LineType};
use crate::theme::Palette;

/// Base style for a rendered line.
pub fn style_for_line_type(line_type: &LineType, palette: &Palette) -> Style {
    let text = Style::default().fg(palette.text);
    match line_type {
        LineType::Heading(1) => Style::default()
            .fg(palette.primary_dark)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(2) => Style::default()
            .fg(palette.secondary)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(palette.secondary_dark)
            .add_modifier(Modifier::BOLD),

        LineType::CodeBlock => Style::default().fg(palette.text_muted),

        LineType::BlockQuote => Style::default()
            .fg(palette.secondary_light)
            .add_modifier(Modifier::ITALIC),

        LineType::Table | LineType::Sheet => Style::default().fg(palette.text_muted),

        LineType::Image => Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::ITALIC),

        LineType::Error => Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD),

        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => text,
    }
}

/// Merge an inline span style over its line style.
pub fn style_for_inline(base: Style, inline: InlineStyle, palette: &Palette) -> Style {
    let mut style = base;

    if let Some(fg) = inline.fg {
        style = style
            .fg(fg_color_for_terminal(fg))
            .remove_modifier(Modifier::DIM);
    } else if inline.code {
        style = style.fg(palette.primary_dark);
    } else if inline.link {
        style = style.fg(palette.info);
    } else if inline.strong && base.fg == Some(palette.text_muted) {
        // Table headers stand out from the grid lines.
        style = style.fg(palette.text);
    }

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("LECTERN_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let mentions = |value: Option<&str>, needles: &[&str]| {
        value.is_some_and(|v| {
            let lower = v.to_ascii_lowercase();
            needles.iter().any(|needle| lower.contains(needle))
        })
    };
    mentions(colorterm, &["truecolor", "24bit"]) || mentions(term, &["direct", "truecolor"])
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // 0..=5 per channel
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
