//! Slide panels built from a markdown deck file.
//!
//! A deck file is split into slides on top-level thematic breaks
//! (`---`, `***`, `___`) outside fenced code. A `---` directly under
//! paragraph text is a setext heading underline and stays in the slide.
//! Each slide is rendered with
//! comrak into styled lines for the slide frame:
//! - highlighted code panels (`lang` or `lang src=path`)
//! - CSV sheet panels (`csv` or `csv src=path`)
//! - boxed markdown tables, lists, quotes and headings

mod parser;
mod sheet;
mod types;

pub use parser::render_slide;
pub use sheet::{Sheet, SheetError, load_sheet, parse_sheet};
pub use types::{
    InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine, Slide, SlideDeck, SlideLayout,
};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("deck {path} has no slides")]
    Empty { path: PathBuf },
}

/// Raw markdown of one slide plus its layout directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSource {
    pub markdown: String,
    pub layout: Option<SlideLayout>,
}

/// Split deck markdown into per-slide sources.
///
/// Separators inside fenced code blocks are ignored and slides with no
/// visible content are dropped.
pub fn split_slides(source: &str) -> Vec<SlideSource> {
    let mut slides = Vec::new();
    let mut current = String::new();
    let mut fence: Option<(char, usize)> = None;
    let mut in_paragraph = false;

    for line in source.lines() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let mut fence_line = false;
        if indent < 4 {
            if let Some((marker, len)) = fence_marker(trimmed) {
                fence_line = true;
                match fence {
                    None => fence = Some((marker, len)),
                    Some((open, open_len))
                        if open == marker
                            && len >= open_len
                            && trimmed.trim_end().chars().all(|c| c == marker) =>
                    {
                        fence = None;
                    }
                    Some(_) => {}
                }
            } else if fence.is_none()
                && is_separator(trimmed)
                && !(in_paragraph && is_setext_underline(trimmed))
            {
                push_slide(&mut slides, std::mem::take(&mut current));
                in_paragraph = false;
                continue;
            }
        }
        in_paragraph = fence.is_none() && !fence_line && continues_paragraph(line);
        current.push_str(line);
        current.push('\n');
    }
    push_slide(&mut slides, current);
    slides
}

fn push_slide(slides: &mut Vec<SlideSource>, markdown: String) {
    let mut layout = None;
    let mut visible = false;
    for line in markdown.lines() {
        let trimmed = line.trim();
        if let Some(directive) = parse_layout_directive(trimmed) {
            layout = Some(directive);
        } else if !trimmed.is_empty() && !(trimmed.starts_with("<!--") && trimmed.ends_with("-->")) {
            visible = true;
        }
    }
    if visible {
        slides.push(SlideSource { markdown, layout });
    }
}

fn fence_marker(line: &str) -> Option<(char, usize)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

fn is_separator(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let Some(first) = compact.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && compact.len() >= 3 && compact.chars().all(|c| c == first)
}

/// A `-` run with no inner spaces under paragraph text is a setext
/// heading underline, not a break.
fn is_setext_underline(line: &str) -> bool {
    line.trim_end().chars().all(|c| c == '-')
}

/// Whether `line` is paragraph text a following setext underline would
/// turn into a heading.
fn continues_paragraph(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || line.len() - trimmed.len() >= 4 {
        return false;
    }
    let list_item = trimmed
        .strip_prefix(['-', '*', '+'])
        .or_else(|| {
            let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
            (1..=9)
                .contains(&digits)
                .then(|| trimmed[digits..].strip_prefix(['.', ')']))
                .flatten()
        })
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']));
    !(list_item
        || is_separator(trimmed)
        || trimmed.starts_with(['#', '>', '|', '<'])
        || trimmed.ends_with("-->"))
}

fn parse_layout_directive(line: &str) -> Option<SlideLayout> {
    let inner = line.strip_prefix("<!--")?.strip_suffix("-->")?.trim();
    let value = inner.strip_prefix("layout:")?.trim();
    match value {
        "title" => Some(SlideLayout::Title),
        "content" => Some(SlideLayout::Content),
        _ => None,
    }
}

impl SlideDeck {
    /// Build a deck from markdown, laying panels out at `width` columns.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Empty`] when the markdown holds no slides.
    pub fn from_source(path: &Path, source: &str, width: u16) -> Result<Self, LoadError> {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let sources = split_slides(source);
        if sources.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        let slides = sources
            .into_iter()
            .enumerate()
            .map(|(idx, src)| {
                let (title, lines) = render_slide(&src.markdown, width, &base_dir);
                let layout = src.layout.unwrap_or(if idx == 0 {
                    SlideLayout::Title
                } else {
                    SlideLayout::Content
                });
                Slide::new(title, layout, src.markdown, lines)
            })
            .collect::<Vec<_>>();
        tracing::info!(path = %path.display(), slides = slides.len(), width, "deck.loaded");
        Ok(Self {
            path: path.to_path_buf(),
            base_dir,
            slides,
            layout_width: width,
        })
    }

    /// Read and build a deck file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] when the file cannot be read and
    /// [`LoadError::Empty`] when it holds no slides.
    pub fn load(path: &Path, width: u16) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(path, &source, width)
    }

    /// Re-render every panel for a new slide width. No-op when unchanged.
    pub fn relayout(&mut self, width: u16) {
        if width == self.layout_width {
            return;
        }
        for slide in &mut self.slides {
            let (_, lines) = render_slide(slide.source(), width, &self.base_dir);
            slide.set_lines(lines);
        }
        tracing::debug!(width, "deck.relayout");
        self.layout_width = width;
    }
}
