//! Core slide types.

use std::path::{Path, PathBuf};

/// How a panel is positioned inside the slide frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideLayout {
    /// Centered horizontally and vertically (cover slides).
    Title,
    /// Anchored top-left.
    #[default]
    Content,
}

/// A single self-contained panel of the deck.
#[derive(Debug, Clone)]
pub struct Slide {
    title: Option<String>,
    layout: SlideLayout,
    source: String,
    lines: Vec<RenderedLine>,
}

impl Slide {
    pub(crate) const fn new(
        title: Option<String>,
        layout: SlideLayout,
        source: String,
        lines: Vec<RenderedLine>,
    ) -> Self {
        Self {
            title,
            layout,
            source,
            lines,
        }
    }

    /// Text of the first heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub const fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Markdown this slide was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub(crate) fn set_lines(&mut self, lines: Vec<RenderedLine>) {
        self.lines = lines;
    }

    /// Widest rendered line in terminal columns.
    pub fn content_width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| unicode_width::UnicodeWidthStr::width(line.content()))
            .max()
            .unwrap_or(0)
    }
}

/// The ordered panels of a deck plus where they came from.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    pub(crate) path: PathBuf,
    pub(crate) base_dir: PathBuf,
    pub(crate) slides: Vec<Slide>,
    pub(crate) layout_width: u16,
}

impl SlideDeck {
    /// A one-slide deck with no content, used before a file is loaded.
    pub fn placeholder() -> Self {
        Self {
            path: PathBuf::new(),
            base_dir: PathBuf::from("."),
            slides: vec![Slide::new(None, SlideLayout::Content, String::new(), Vec::new())],
            layout_width: 80,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Width the panels are currently laid out for.
    pub const fn layout_width(&self) -> u16 {
        self.layout_width
    }
}

/// A rendered line of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Styled spans, or `None` when the line is a single run of `content`.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Inline style flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
    pub fg: Option<InlineColor>,
}

/// RGB color for inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    CodeBlock,
    BlockQuote,
    /// List item with nesting level
    ListItem(usize),
    Table,
    /// CSV sheet row
    Sheet,
    /// Image placeholder
    Image,
    /// Inline load failure (missing sheet or snippet)
    Error,
    Empty,
}
