//! Geometry of the presentation shell.
//!
//! The renderer and the mouse hit-tester share [`ShellLayout`], so a click
//! always lands on the control that was drawn under it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Columns between the frame border and the panel.
pub const SLIDE_PADDING: u16 = 2;

pub const HOME_LABEL: &str = "[⌂]";
pub const PREV_LABEL: &str = "[◀]";
pub const NEXT_LABEL: &str = "[▶]";
pub const FULLSCREEN_LABEL: &str = "[⛶]";
const CONTROL_GAP: u16 = 2;

pub const HINT: &str = "Use arrow keys or navigation buttons to move between slides";

/// Something on screen that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Home,
    Prev,
    Next,
    Fullscreen,
    Dot(usize),
    Slide,
}

/// Click targets of the controls row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub row: Rect,
    pub home: Rect,
    pub prev: Rect,
    pub counter: Rect,
    pub next: Rect,
    pub fullscreen: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLayout {
    pub progress: Rect,
    /// The slide frame, border included when not fullscreen.
    pub frame: Rect,
    /// Where the panel text goes.
    pub slide: Rect,
    pub hint: Option<Rect>,
    pub controls: Option<Controls>,
    /// One cell per dot; empty when the row is too narrow or fullscreen.
    pub dots: Vec<Rect>,
    pub status: Rect,
}

impl ShellLayout {
    /// Lay out the shell for `area`.
    pub fn compute(
        area: Rect,
        slide_count: usize,
        current_index: usize,
        fullscreen: bool,
    ) -> Self {
        let dots_fit = !fullscreen && dot_row_width(slide_count) <= area.width;
        let show_hint = !fullscreen && current_index == 0;
        let chrome = u16::from(!fullscreen);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(u16::from(show_hint)),
                Constraint::Length(chrome),
                Constraint::Length(u16::from(dots_fit)),
                Constraint::Length(1),
            ])
            .split(area);

        let frame = rows[1];
        let border = chrome;
        let slide = Rect {
            x: frame.x + border + SLIDE_PADDING,
            y: frame.y + border,
            width: frame.width.saturating_sub(2 * (border + SLIDE_PADDING)),
            height: frame.height.saturating_sub(2 * border),
        };

        let controls = (!fullscreen && rows[3].height > 0).then(|| controls_for(rows[3], slide_count));
        let dots = if dots_fit && rows[4].height > 0 {
            dot_cells(rows[4], slide_count)
        } else {
            Vec::new()
        };

        Self {
            progress: rows[0],
            frame,
            slide,
            hint: (show_hint && rows[2].height > 0).then_some(rows[2]),
            controls,
            dots,
            status: rows[5],
        }
    }

    /// What sits under a terminal cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        if let Some(controls) = &self.controls {
            let buttons = [
                (controls.home, HitTarget::Home),
                (controls.prev, HitTarget::Prev),
                (controls.next, HitTarget::Next),
                (controls.fullscreen, HitTarget::Fullscreen),
            ];
            if let Some((_, target)) = buttons
                .into_iter()
                .find(|(rect, _)| contains(*rect, column, row))
            {
                return Some(target);
            }
        }
        if let Some(idx) = self.dots.iter().position(|dot| contains(*dot, column, row)) {
            return Some(HitTarget::Dot(idx));
        }
        contains(self.frame, column, row).then_some(HitTarget::Slide)
    }
}

/// Width the panels are laid out for in a terminal `width` columns wide.
pub const fn slide_content_width(width: u16, fullscreen: bool) -> u16 {
    let border = if fullscreen { 0 } else { 1 };
    let inner = width.saturating_sub(2 * (border + SLIDE_PADDING));
    if inner == 0 { 1 } else { inner }
}

/// Label between the prev and next buttons.
pub fn counter_label(current_index: usize, slide_count: usize) -> String {
    format!("{} / {}", current_index + 1, slide_count)
}

fn controls_for(row: Rect, slide_count: usize) -> Controls {
    // The counter is sized for the widest value so buttons never shift.
    let counter_width = label_width(&counter_label(slide_count.saturating_sub(1), slide_count));
    let widths = [
        label_width(HOME_LABEL),
        label_width(PREV_LABEL),
        counter_width,
        label_width(NEXT_LABEL),
        label_width(FULLSCREEN_LABEL),
    ];
    let total = widths.iter().sum::<u16>() + CONTROL_GAP * 4;
    let mut x = row.x + row.width.saturating_sub(total) / 2;
    let mut rects = [Rect::default(); 5];
    for (rect, width) in rects.iter_mut().zip(widths) {
        let width = width.min((row.x + row.width).saturating_sub(x));
        *rect = Rect::new(x, row.y, width, 1);
        x = x.saturating_add(width + CONTROL_GAP);
    }
    Controls {
        row,
        home: rects[0],
        prev: rects[1],
        counter: rects[2],
        next: rects[3],
        fullscreen: rects[4],
    }
}

/// Dots are one column each with a one column gap.
fn dot_row_width(slide_count: usize) -> u16 {
    u16::try_from((slide_count * 2).saturating_sub(1)).unwrap_or(u16::MAX)
}

fn dot_cells(row: Rect, slide_count: usize) -> Vec<Rect> {
    let start = row.x + row.width.saturating_sub(dot_row_width(slide_count)) / 2;
    (0..slide_count)
        .filter_map(|idx| u16::try_from(idx * 2).ok())
        .map(|offset| Rect::new(start + offset, row.y, 1, 1))
        .collect()
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
