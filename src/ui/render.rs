use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::app::Model;
use crate::deck::{Phase, TransitionFrame};
use crate::slides::{Slide, SlideLayout};
use crate::theme::Palette;

use super::layout::ShellLayout;
use super::{chrome, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = ShellLayout::compute(
        area,
        model.deck.slide_count(),
        model.deck.current_index(),
        model.fullscreen,
    );

    chrome::render_progress(model, frame, layout.progress);
    render_slide_frame(model, frame, &layout);
    if let Some(hint) = layout.hint {
        chrome::render_hint(&model.palette, frame, hint);
    }
    if let Some(controls) = &layout.controls {
        chrome::render_controls(model, frame, controls);
    }
    if !layout.dots.is_empty() {
        chrome::render_dots(model, frame, &layout.dots);
    }
    status::render_status_row(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_slide_frame(model: &Model, frame: &mut Frame, layout: &ShellLayout) {
    frame.render_widget(Clear, layout.frame);
    let visible = model.visible_frame();
    let slide = model.slides.get(visible.slide);

    if !model.fullscreen {
        let title = slide
            .and_then(Slide::title)
            .map_or_else(|| format!(" Slide {} ", visible.slide + 1), |t| format!(" {t} "));
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(model.palette.secondary_light))
            .title(Line::styled(
                title,
                Style::default()
                    .fg(model.palette.secondary)
                    .add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block, layout.frame);
    }

    let Some(slide) = slide else {
        return;
    };
    let lines = slide_lines(slide, &model.palette, is_dimmed(visible));
    let area = panel_area(slide, layout.slide, lines.len());
    frame.render_widget(Paragraph::new(lines), area);
}

/// Styled lines for one panel.
pub fn slide_lines(slide: &Slide, palette: &Palette, dimmed: bool) -> Vec<Line<'static>> {
    let dim = |style: Style| {
        if dimmed {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    };
    slide
        .lines()
        .iter()
        .map(|line| {
            let line_style = super::style::style_for_line_type(line.line_type(), palette);
            line.spans().map_or_else(
                || Line::from(Span::styled(line.content().to_string(), dim(line_style))),
                |spans| {
                    Line::from(
                        spans
                            .iter()
                            .map(|span| {
                                let style =
                                    super::style::style_for_inline(line_style, span.style(), palette);
                                Span::styled(span.text().to_string(), dim(style))
                            })
                            .collect::<Vec<_>>(),
                    )
                },
            )
        })
        .collect()
}

/// The exiting panel and the first half of the entering panel are faded.
fn is_dimmed(frame: TransitionFrame) -> bool {
    match frame.phase {
        Some(Phase::Exit) => true,
        Some(Phase::Enter) => frame.progress < 0.5,
        None => false,
    }
}

/// Where the panel sits inside the slide area.
///
/// Title slides are centered as a block; content slides start top-left.
fn panel_area(slide: &Slide, area: Rect, line_count: usize) -> Rect {
    match slide.layout() {
        SlideLayout::Content => area,
        SlideLayout::Title => {
            let height = u16::try_from(line_count).unwrap_or(u16::MAX).min(area.height);
            let width = u16::try_from(slide.content_width())
                .unwrap_or(u16::MAX)
                .min(area.width);
            Rect {
                x: area.x + (area.width - width) / 2,
                y: area.y + (area.height - height) / 2,
                width,
                height,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimming_follows_phase() {
        let frame = |phase, progress| TransitionFrame {
            slide: 0,
            phase,
            progress,
        };
        assert!(is_dimmed(frame(Some(Phase::Exit), 0.9)));
        assert!(is_dimmed(frame(Some(Phase::Enter), 0.2)));
        assert!(!is_dimmed(frame(Some(Phase::Enter), 0.6)));
        assert!(!is_dimmed(frame(None, 1.0)));
    }
}
