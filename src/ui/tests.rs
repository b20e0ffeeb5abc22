use std::path::Path;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;

use super::*;
use crate::app::{Message, Model, update};
use crate::slides::SlideDeck;
use crate::theme::Palette;

fn create_test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn create_test_model(source: &str) -> Model {
    let slides = SlideDeck::from_source(Path::new("talk.md"), source, 74).unwrap();
    let mut model = Model::new(slides, 0, (80, 24)).unwrap();
    model.palette = Palette::dark();
    model.set_transition_ms(0);
    model
}

fn three_slides() -> Model {
    create_test_model("# Cover\n\nSubtitle\n\n---\n# Agenda\n\n- One\n- Two\n---\n# Thanks\n")
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    (0..terminal.backend().buffer().area.height)
        .map(|row| row_text(terminal, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_shows_title_in_frame_border() {
    let terminal = draw(&three_slides());
    let top = row_text(&terminal, 1);
    assert!(top.starts_with('╭'), "rounded frame: {top}");
    assert!(top.contains(" Cover "));
}

#[test]
fn test_render_shows_hint_only_on_first_slide() {
    let model = three_slides();
    assert!(screen_text(&draw(&model)).contains(HINT));

    let model = update(model, Message::Advance);
    assert!(!screen_text(&draw(&model)).contains(HINT));
}

#[test]
fn test_render_controls_show_counter() {
    let model = update(three_slides(), Message::Advance);
    let layout = model.shell_layout();
    let controls = layout.controls.unwrap();
    let row = row_text(&draw(&model), controls.row.y);
    assert!(row.contains("[⌂]"));
    assert!(row.contains("2 / 3"), "{row}");
}

#[test]
fn test_prev_is_dimmed_on_first_slide() {
    let model = three_slides();
    let controls = model.shell_layout().controls.unwrap();
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let prev = &buffer[(controls.prev.x, controls.prev.y)];
    let next = &buffer[(controls.next.x, controls.next.y)];
    assert!(prev.modifier.contains(Modifier::DIM));
    assert!(!next.modifier.contains(Modifier::DIM));
}

#[test]
fn test_active_dot_is_filled() {
    let model = update(three_slides(), Message::Last);
    let layout = model.shell_layout();
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let symbols: Vec<&str> = layout
        .dots
        .iter()
        .map(|dot| buffer[(dot.x, dot.y)].symbol())
        .collect();
    assert_eq!(symbols, ["○", "○", "●"]);
}

#[test]
fn test_progress_bar_fills_proportionally() {
    let model = update(three_slides(), Message::Advance);
    let bar = row_text(&draw(&model), 0);
    let filled = bar.chars().filter(|c| *c == '━').count();
    assert_eq!(filled, 53, "2 of 3 slides across 80 columns");
}

#[test]
fn test_content_slide_is_anchored_top_left() {
    let model = update(three_slides(), Message::Advance);
    let slide = model.shell_layout().slide;
    let terminal = draw(&model);
    let row: String = row_text(&terminal, slide.y)
        .chars()
        .skip(usize::from(slide.x))
        .collect();
    assert!(row.starts_with("Agenda"), "{row}");
}

#[test]
fn test_title_slide_is_centered() {
    let model = three_slides();
    let slide = model.shell_layout().slide;
    let text = screen_text(&draw(&model));
    let row = text
        .lines()
        .position(|line| line.contains("Cover") && !line.contains('╭'))
        .unwrap();
    let row = u16::try_from(row).unwrap();
    assert!(row > slide.y + 2, "vertically centered, got row {row}");
    let line = text.lines().nth(usize::from(row)).unwrap();
    let col = line.find("Cover").unwrap();
    assert!(col > usize::from(slide.x) + 10, "horizontally centered: {line}");
}

#[test]
fn test_fullscreen_hides_chrome_but_keeps_progress() {
    let model = update(three_slides(), Message::ToggleFullscreen);
    let terminal = draw(&model);
    let text = screen_text(&terminal);
    assert!(!text.contains('╭'));
    assert!(!text.contains("[⌂]"));
    assert!(!text.contains(HINT));
    assert!(!text.contains('●'));
    assert!(row_text(&terminal, 0).contains('━'));
}

#[test]
fn test_exiting_panel_is_dimmed() {
    let mut model = three_slides();
    model.set_transition_ms(400);
    let model = update(update(model, Message::Tick(100)), Message::Advance);
    let slide = model.shell_layout().slide;
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let text = screen_text(&terminal);
    assert!(text.contains("Cover"), "outgoing panel still shown");
    assert!(!text.contains("Agenda"), "only one panel visible");
    let dimmed = (slide.y..slide.y + slide.height).any(|row| {
        (slide.x..slide.x + slide.width).any(|col| {
            let cell = &buffer[(col, row)];
            cell.symbol() == "C" && cell.modifier.contains(Modifier::DIM)
        })
    });
    assert!(dimmed);
}

#[test]
fn test_jump_prompt_on_status_row() {
    let model = update(three_slides(), Message::JumpInput('2'));
    let status = model.shell_layout().status;
    let row = row_text(&draw(&model), status.y);
    assert!(row.contains("Go to slide: 2_"), "{row}");
}

#[test]
fn test_toast_replaces_status_bar() {
    let model = update(three_slides(), Message::GoTo(8));
    let status = model.shell_layout().status;
    let row = row_text(&draw(&model), status.y);
    assert!(row.starts_with("[warn] slide 9 is out of range"), "{row}");
}

#[test]
fn test_status_bar_shows_file_and_help_hint() {
    let model = three_slides();
    let status = model.shell_layout().status;
    let row = row_text(&draw(&model), status.y);
    assert!(row.contains("talk.md"));
    assert!(row.contains("?:help"));
}

#[test]
fn test_watch_indicator_uses_success_color() {
    let mut model = three_slides();
    model.watch_enabled = true;
    let status = model.shell_layout().status;
    let terminal = draw(&model);
    let row = row_text(&terminal, status.y);
    let byte = row.find("[watching]").unwrap();
    let col = u16::try_from(row[..byte].chars().count()).unwrap();
    let cell = &terminal.backend().buffer()[(col, status.y)];
    assert_eq!(cell.fg, model.palette.success);
    assert!(row.contains("?:help"));
}

#[test]
fn test_help_overlay_lists_key_map() {
    let model = update(three_slides(), Message::ToggleHelp);
    let text = screen_text(&draw(&model));
    assert!(text.contains("Help"));
    assert!(text.contains("Navigation"));
    assert!(text.contains("Next slide"));
}

#[test]
fn test_slide_lines_apply_dim_to_every_span() {
    let model = three_slides();
    let slide = model.slides.get(1).unwrap();
    let lines = slide_lines(slide, &model.palette, true);
    assert!(
        lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .all(|span| span.style.add_modifier.contains(Modifier::DIM))
    );
}

#[test]
fn test_render_survives_tiny_terminal() {
    let model = three_slides();
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
