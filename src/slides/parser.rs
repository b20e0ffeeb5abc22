//! Slide markdown rendering with comrak.

use std::path::Path;

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::sheet::{self, Sheet};
use super::types::{InlineSpan, InlineStyle, LineType, RenderedLine};

const CODE_RIGHT_PADDING: usize = 2;

/// Column alignment for boxed tables and sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

impl From<TableAlignment> for Align {
    fn from(value: TableAlignment) -> Self {
        match value {
            TableAlignment::Center => Self::Center,
            TableAlignment::Right => Self::Right,
            TableAlignment::Left | TableAlignment::None => Self::Left,
        }
    }
}

/// Render one slide's markdown to lines wrapped at `width`.
///
/// Returns the text of the first heading alongside the lines. Relative
/// `src=` includes resolve against `base_dir`.
pub fn render_slide(source: &str, width: u16, base_dir: &Path) -> (Option<String>, Vec<RenderedLine>) {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut renderer = SlideRenderer {
        lines: Vec::new(),
        title: None,
        width: usize::from(width.max(1)),
        base_dir,
    };
    for child in root.children() {
        renderer.block(child, 0);
    }
    while renderer
        .lines
        .last()
        .is_some_and(|line| *line.line_type() == LineType::Empty)
    {
        renderer.lines.pop();
    }
    (renderer.title, renderer.lines)
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options
}

struct SlideRenderer<'p> {
    lines: Vec<RenderedLine>,
    title: Option<String>,
    width: usize,
    base_dir: &'p Path,
}

impl SlideRenderer<'_> {
    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                let text = extract_text(node);
                if self.title.is_none() {
                    self.title = Some(text.clone());
                }
                if !self.lines.is_empty() {
                    self.ensure_blank();
                }
                for wrapped in wrap_text(&text, self.width) {
                    self.lines
                        .push(RenderedLine::new(wrapped, LineType::Heading(heading.level)));
                }
                self.lines.push(blank());
            }
            NodeValue::Paragraph => {
                let images = paragraph_images(node);
                if images.is_empty() {
                    let spans = collect_inline_spans(node);
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                } else {
                    for alt in images {
                        self.lines
                            .push(RenderedLine::new(format!("[Image: {alt}]"), LineType::Image));
                    }
                }
                self.lines.push(blank());
            }
            NodeValue::List(list) => {
                let mut number = list.start;
                for item in node.children() {
                    let marker = match (&item.data.borrow().value, list.list_type) {
                        (NodeValue::TaskItem(Some(_)), _) => "☑".to_string(),
                        (NodeValue::TaskItem(None), _) => "☐".to_string(),
                        (_, ListType::Bullet) => bullet_for_depth(depth).to_string(),
                        (_, ListType::Ordered) => format!("{number}."),
                    };
                    number += 1;
                    self.list_item(item, depth, &marker);
                }
                if depth == 0 {
                    self.lines.push(blank());
                }
            }
            NodeValue::BlockQuote => {
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::BlockQuote, "▎ ", "▎ ");
                self.lines.push(blank());
            }
            NodeValue::CodeBlock(code_block) => {
                let info = FenceInfo::parse(&code_block.info);
                self.fenced_block(&info, &code_block.literal);
                self.lines.push(blank());
            }
            NodeValue::Table(table) => {
                let aligns: Vec<Align> = table.alignments.iter().copied().map(Align::from).collect();
                let (header, rows) = collect_table_rows(node);
                self.lines
                    .extend(render_grid(header.as_deref(), &rows, &aligns, self.width, LineType::Table));
                self.lines.push(blank());
            }
            NodeValue::ThematicBreak => {
                self.lines
                    .push(RenderedLine::new("─".repeat(self.width), LineType::Paragraph));
                self.lines.push(blank());
            }
            // Layout directives and raw HTML are not drawn.
            NodeValue::HtmlBlock(_) => {}
            _ => {
                for child in node.children() {
                    self.block(child, depth);
                }
            }
        }
    }

    fn list_item<'a>(&mut self, item: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth);
        let mut first = true;
        for child in item.children() {
            if !matches!(child.data.borrow().value, NodeValue::Paragraph) {
                self.block(child, depth + 1);
                continue;
            }
            let spans = collect_inline_spans(child);
            let lead = if first {
                format!("{indent}{marker} ")
            } else {
                " ".repeat(indent.width() + marker.width() + 1)
            };
            let cont = " ".repeat(lead.width());
            self.push_wrapped(&spans, LineType::ListItem(depth), &lead, &cont);
            first = false;
        }
    }

    fn fenced_block(&mut self, info: &FenceInfo, literal: &str) {
        let is_sheet = info
            .language
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case("csv"));
        if is_sheet {
            let result = match &info.src {
                Some(src) => sheet::load_sheet(&self.base_dir.join(src)),
                None => sheet::parse_sheet(literal),
            };
            match result {
                Ok(sheet) => self.sheet(&sheet, info.src.as_deref()),
                Err(err) => self.load_error(&err.to_string()),
            }
            return;
        }

        let code = match &info.src {
            Some(src) => {
                let path = self.base_dir.join(src);
                match std::fs::read_to_string(&path) {
                    Ok(code) => code,
                    Err(err) => {
                        self.load_error(&format!("failed to read {}: {err}", path.display()));
                        return;
                    }
                }
            }
            None => literal.to_string(),
        };
        let label = info.src.as_deref().or(info.language.as_deref());
        self.code_panel(info.language.as_deref(), label, &code);
    }

    fn code_panel(&mut self, language: Option<&str>, label: Option<&str>, code: &str) {
        let highlighted = crate::highlight::highlight_code(language, code);
        let natural = highlighted
            .iter()
            .map(|spans| spans_width(spans))
            .max()
            .unwrap_or(0);
        let content_width = natural.min(self.width.saturating_sub(4 + CODE_RIGHT_PADDING).max(1));
        let inner = content_width + 2 + CODE_RIGHT_PADDING;

        let label = format!(" {} ", label.unwrap_or("code"));
        let visible_label = truncate_text(&label, inner);
        let top = format!(
            "┌{}{}┐",
            visible_label,
            "─".repeat(inner.saturating_sub(visible_label.width()))
        );
        self.lines.push(RenderedLine::new(top, LineType::CodeBlock));

        for spans in highlighted {
            let trimmed = truncate_spans(&spans, content_width);
            let pad = content_width.saturating_sub(spans_width(&trimmed)) + CODE_RIGHT_PADDING;
            let mut line_spans = vec![InlineSpan::new("│ ".to_string(), InlineStyle::default())];
            line_spans.extend(trimmed);
            line_spans.push(InlineSpan::new(
                format!("{}│", " ".repeat(pad)),
                InlineStyle::default(),
            ));
            let content = spans_to_string(&line_spans);
            self.lines
                .push(RenderedLine::with_spans(content, LineType::CodeBlock, line_spans));
        }

        self.lines.push(RenderedLine::new(
            format!("└{}┘", "─".repeat(inner)),
            LineType::CodeBlock,
        ));
    }

    fn sheet(&mut self, sheet: &Sheet, src: Option<&str>) {
        let aligns: Vec<Align> = (0..sheet.column_count())
            .map(|col| {
                if sheet.is_numeric_column(col) {
                    Align::Right
                } else {
                    Align::Left
                }
            })
            .collect();
        let caption = format!(
            "▦ {} · {} rows × {} columns",
            src.unwrap_or("sheet"),
            sheet.rows().len(),
            sheet.column_count()
        );
        self.lines
            .push(RenderedLine::new(truncate_text(&caption, self.width), LineType::Sheet));
        self.lines.extend(render_grid(
            Some(sheet.header()),
            sheet.rows(),
            &aligns,
            self.width,
            LineType::Sheet,
        ));
    }

    fn load_error(&mut self, message: &str) {
        tracing::warn!(error = message, "slide.include failed");
        for line in wrap_text(&format!("⚠ {message}"), self.width) {
            self.lines.push(RenderedLine::new(line, LineType::Error));
        }
    }

    fn ensure_blank(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|line| *line.line_type() != LineType::Empty)
        {
            self.lines.push(blank());
        }
    }

    fn push_wrapped(&mut self, spans: &[InlineSpan], line_type: LineType, lead: &str, cont: &str) {
        let available = self.width.saturating_sub(lead.width()).max(1);
        for (idx, wrapped) in wrap_spans(spans, available).into_iter().enumerate() {
            let prefix = if idx == 0 { lead } else { cont };
            let mut line_spans = Vec::with_capacity(wrapped.len() + 1);
            if !prefix.is_empty() {
                line_spans.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
            }
            line_spans.extend(wrapped);
            let content = spans_to_string(&line_spans);
            self.lines
                .push(RenderedLine::with_spans(content, line_type, line_spans));
        }
    }
}

/// Parsed fence info string: `lang [src=path]`.
#[derive(Debug, Default, PartialEq, Eq)]
struct FenceInfo {
    language: Option<String>,
    src: Option<String>,
}

impl FenceInfo {
    fn parse(info: &str) -> Self {
        let mut out = Self::default();
        for (idx, token) in info.split_whitespace().enumerate() {
            if let Some(src) = token.strip_prefix("src=") {
                out.src = Some(src.trim_matches('"').to_string());
            } else if idx == 0 {
                out.language = Some(token.to_string());
            }
        }
        out
    }
}

const fn blank() -> RenderedLine {
    RenderedLine::new(String::new(), LineType::Empty)
}

const fn bullet_for_depth(depth: usize) -> &'static str {
    match depth % 3 {
        0 => "•",
        1 => "◦",
        _ => "▪",
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
    out
}

fn paragraph_images<'a>(node: &'a AstNode<'a>) -> Vec<String> {
    let mut images = Vec::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Image(link) => {
                let alt = extract_text(child);
                images.push(if alt.is_empty() { link.url.clone() } else { alt });
            }
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            NodeValue::Text(text) if text.trim().is_empty() => {}
            _ => return Vec::new(),
        }
    }
    images
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for child in node.children() {
        inline(child, InlineStyle::default(), &mut spans);
    }
    spans
}

fn inline<'a>(node: &'a AstNode<'a>, style: InlineStyle, out: &mut Vec<InlineSpan>) {
    let mut child_style = style;
    match &node.data.borrow().value {
        NodeValue::Text(text) => {
            out.push(InlineSpan::new(text.to_string(), style));
            return;
        }
        NodeValue::Code(code) => {
            out.push(InlineSpan::new(
                code.literal.clone(),
                InlineStyle {
                    code: true,
                    ..style
                },
            ));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            out.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Image(_) => {
            let alt = extract_text(node);
            out.push(InlineSpan::new(format!("[Image: {alt}]"), style));
            return;
        }
        NodeValue::HtmlInline(_) => return,
        NodeValue::Emph => child_style.emphasis = true,
        NodeValue::Strong => child_style.strong = true,
        NodeValue::Strikethrough => child_style.strikethrough = true,
        NodeValue::Link(_) => child_style.link = true,
        // Nested blocks inside quotes and list items read as running text.
        NodeValue::Paragraph => {
            if !out.is_empty() {
                out.push(InlineSpan::new(" ".to_string(), style));
            }
        }
        _ => {}
    }
    for child in node.children() {
        inline(child, child_style, out);
    }
}

fn collect_table_rows<'a>(table: &'a AstNode<'a>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    let mut header = None;
    let mut rows = Vec::new();
    for row in table.children() {
        let is_header = match row.data.borrow().value {
            NodeValue::TableRow(is_header) => is_header,
            _ => continue,
        };
        let cells: Vec<String> = row
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        if is_header && header.is_none() {
            header = Some(cells);
        } else {
            rows.push(cells);
        }
    }
    (header, rows)
}

/// Box-draw a grid, shrinking the widest columns until it fits `max_width`.
fn render_grid(
    header: Option<&[String]>,
    rows: &[Vec<String>],
    aligns: &[Align],
    max_width: usize,
    line_type: LineType,
) -> Vec<RenderedLine> {
    let columns = header
        .map(<[String]>::len)
        .into_iter()
        .chain(rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![1usize; columns];
    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }
    // Each column costs its width plus two padding spaces and one border.
    let overhead = columns * 3 + 1;
    while widths.iter().sum::<usize>() + overhead > max_width {
        let Some((idx, widest)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= 3 {
            break;
        }
        widths[idx] = widest - 1;
    }

    let mut lines = vec![RenderedLine::new(border(&widths, '┌', '┬', '┐'), line_type)];
    if let Some(header) = header {
        let content = grid_row(header, &widths, aligns);
        let style = InlineStyle {
            strong: true,
            ..InlineStyle::default()
        };
        lines.push(RenderedLine::with_spans(
            content.clone(),
            line_type,
            vec![InlineSpan::new(content, style)],
        ));
        lines.push(RenderedLine::new(border(&widths, '├', '┼', '┤'), line_type));
    }
    for row in rows {
        lines.push(RenderedLine::new(grid_row(row, &widths, aligns), line_type));
    }
    lines.push(RenderedLine::new(border(&widths, '└', '┴', '┘'), line_type));
    lines
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn grid_row(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().copied().enumerate() {
        let raw = cells.get(idx).map_or("", String::as_str);
        let content = if raw.width() > width {
            let mut cut = truncate_text(raw, width.saturating_sub(1));
            cut.push('…');
            cut
        } else {
            raw.to_string()
        };
        let padding = width.saturating_sub(content.width());
        out.push(' ');
        match aligns.get(idx).copied().unwrap_or(Align::Left) {
            Align::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            Align::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            Align::Left => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let spans = [InlineSpan::new(text.to_string(), InlineStyle::default())];
    wrap_spans(&spans, width)
        .iter()
        .map(|line| spans_to_string(line))
        .collect()
}

/// Greedy word wrap preserving span styles. Words longer than a line are
/// split at character boundaries.
fn wrap_spans(spans: &[InlineSpan], width: usize) -> Vec<Vec<InlineSpan>> {
    let width = width.max(1);
    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut used = 0usize;

    for span in spans {
        let style = span.style();
        for piece in span.text().split_inclusive(' ') {
            let word = piece.trim_end_matches(' ');
            if used == 0 && word.is_empty() {
                continue;
            }
            if used > 0 && used + word.width() > width {
                lines.push(finish_line(std::mem::take(&mut current)));
                used = 0;
                if word.is_empty() {
                    continue;
                }
            }
            let mut remaining = piece;
            while used == 0 && remaining.trim_end_matches(' ').width() > width {
                let head = truncate_text(remaining, width);
                if head.is_empty() {
                    break;
                }
                push_piece(&mut current, &head, style);
                lines.push(finish_line(std::mem::take(&mut current)));
                remaining = &remaining[head.len()..];
            }
            if remaining.is_empty() {
                continue;
            }
            push_piece(&mut current, remaining, style);
            used += remaining.width();
        }
    }
    if !current.is_empty() {
        lines.push(finish_line(current));
    }
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

fn push_piece(line: &mut Vec<InlineSpan>, text: &str, style: InlineStyle) {
    if let Some(last) = line.last_mut()
        && last.style() == style
    {
        *last = InlineSpan::new(format!("{}{text}", last.text()), style);
        return;
    }
    line.push(InlineSpan::new(text.to_string(), style));
}

fn finish_line(mut line: Vec<InlineSpan>) -> Vec<InlineSpan> {
    while let Some(last) = line.last() {
        let trimmed = last.text().trim_end_matches(' ');
        if trimmed.is_empty() {
            line.pop();
            continue;
        }
        if trimmed.len() != last.text().len() {
            let style = last.style();
            let trimmed = trimmed.to_string();
            line.pop();
            line.push(InlineSpan::new(trimmed, style));
        }
        break;
    }
    line
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

fn spans_width(spans: &[InlineSpan]) -> usize {
    spans.iter().map(|span| span.text().width()).sum()
}

fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let taken = truncate_text(span.text(), remaining);
        if taken.is_empty() {
            break;
        }
        remaining -= taken.width();
        out.push(InlineSpan::new(taken, span.style()));
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}
