//! Syntax highlighting for code panels.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.

use std::sync::{LazyLock, Mutex};

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::slides::{InlineColor, InlineSpan, InlineStyle};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);
static BACKGROUND_OVERRIDE: Mutex<Option<HighlightBackground>> = Mutex::new(None);

/// Forced terminal background, set from `--theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

/// Resolved terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    Light,
    Dark,
}

/// Override background detection. `None` falls back to `COLORFGBG`.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    if let Ok(mut guard) = BACKGROUND_OVERRIDE.lock() {
        *guard = mode;
    }
}

pub fn background_mode() -> BackgroundMode {
    let forced = BACKGROUND_OVERRIDE.lock().ok().and_then(|guard| *guard);
    match forced {
        Some(HighlightBackground::Light) => BackgroundMode::Light,
        Some(HighlightBackground::Dark) => BackgroundMode::Dark,
        None => background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()),
    }
}

/// Interpret a `COLORFGBG` value such as `15;0` (fg;bg).
///
/// Background indices 7 and 9-15 are the light half of the ANSI palette.
pub fn background_mode_from_colorfgbg(value: Option<&str>) -> BackgroundMode {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7 | 9..=15) => BackgroundMode::Light,
        _ => BackgroundMode::Dark,
    }
}

fn theme_for(mode: BackgroundMode) -> Option<&'static Theme> {
    let name = match mode {
        BackgroundMode::Light => "InspiredGitHub",
        BackgroundMode::Dark => "base16-ocean.dark",
    };
    THEME_SET.themes.get(name)
}

/// Highlight `code` as `language`, one span list per source line.
///
/// Unknown languages (and highlighting failures) fall back to plain code
/// spans. Background colors are never set so the terminal background shows.
pub fn highlight_code(language: Option<&str>, code: &str) -> Vec<Vec<InlineSpan>> {
    let mode = background_mode();
    let syntax = language.and_then(|lang| SYNTAX_SET.find_syntax_by_token(lang));
    let (Some(syntax), Some(theme)) = (syntax, theme_for(mode)) else {
        return plain_lines(code);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = Vec::new();
    for line in LinesWithEndings::from(code) {
        let Ok(regions) = highlighter.highlight_line(line, &SYNTAX_SET) else {
            tracing::debug!(language, "highlight.failed");
            return plain_lines(code);
        };
        let spans = regions
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches(['\n', '\r']);
                if text.is_empty() {
                    return None;
                }
                let fg = InlineColor {
                    r: style.foreground.r,
                    g: style.foreground.g,
                    b: style.foreground.b,
                };
                let inline = InlineStyle {
                    fg: Some(adjust_fg_for_background(fg, mode)),
                    strong: style.font_style.contains(FontStyle::BOLD),
                    emphasis: style.font_style.contains(FontStyle::ITALIC),
                    code: true,
                    ..InlineStyle::default()
                };
                Some(InlineSpan::new(text.to_string(), inline))
            })
            .collect();
        out.push(spans);
    }
    out
}

fn plain_lines(code: &str) -> Vec<Vec<InlineSpan>> {
    let style = InlineStyle {
        code: true,
        ..InlineStyle::default()
    };
    code.lines()
        .map(|line| vec![InlineSpan::new(line.to_string(), style)])
        .collect()
}

/// Darken theme colors that would wash out on a light background.
pub fn adjust_fg_for_background(color: InlineColor, mode: BackgroundMode) -> InlineColor {
    const MAX_LIGHT_LUMA: f32 = 110.0;
    if mode == BackgroundMode::Dark {
        return color;
    }
    let luma = luma(color);
    if luma <= MAX_LIGHT_LUMA {
        return color;
    }
    let scale = MAX_LIGHT_LUMA / luma;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |c: u8| (f32::from(c) * scale).round().clamp(0.0, 255.0) as u8;
    InlineColor {
        r: scaled(color.r),
        g: scaled(color.g),
        b: scaled(color.b),
    }
}

fn luma(color: InlineColor) -> f32 {
    0.0722f32.mul_add(
        f32::from(color.b),
        0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
    )
}
