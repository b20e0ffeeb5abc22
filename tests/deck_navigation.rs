//! Navigation scenarios against the public deck API.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use lectern::app::{CaptureControl, InputCapture, Message, Model, update};
use lectern::deck::{Deck, DeckError, TransitionSequencer};
use lectern::slides::SlideDeck;

const SLIDES: usize = 14;

fn deck_at(index: usize) -> Deck {
    Deck::starting_at(SLIDES, index).unwrap()
}

#[test]
fn advance_to_the_end_then_saturate() {
    let mut deck = deck_at(0);
    for _ in 0..13 {
        assert!(deck.advance());
    }
    assert_eq!(deck.current_index(), 13);
    assert!(!deck.advance());
    assert_eq!(deck.current_index(), 13);
}

#[test]
fn retreat_to_the_start_then_saturate() {
    let mut deck = deck_at(13);
    for _ in 0..13 {
        assert!(deck.retreat());
    }
    assert_eq!(deck.current_index(), 0);
    assert!(!deck.retreat());
    assert_eq!(deck.current_index(), 0);
}

#[test]
fn goto_first_then_home_is_stable() {
    let mut deck = deck_at(5);
    deck.goto(0).unwrap();
    assert_eq!(deck.current_index(), 0);
    deck.home();
    assert_eq!(deck.current_index(), 0);
}

#[test]
fn goto_last_slide() {
    let mut deck = deck_at(0);
    deck.goto(13).unwrap();
    assert_eq!(deck.current_index(), 13);
}

#[test]
fn goto_out_of_range_is_rejected() {
    let mut deck = deck_at(4);
    assert_eq!(
        deck.goto(14),
        Err(DeckError::InvalidIndex {
            index: 14,
            slide_count: 14
        })
    );
    assert_eq!(deck.current_index(), 4);
}

#[test]
fn rapid_sequence_settles_on_latest_target() {
    let mut deck = deck_at(0);
    let mut transition = TransitionSequencer::new(0, 400);
    deck.advance();
    transition.request(deck.current_index(), 0);
    deck.advance();
    transition.request(deck.current_index(), 30);
    deck.retreat();
    transition.request(deck.current_index(), 60);
    assert_eq!(deck.current_index(), 1);
    assert_eq!(transition.target(), 1);

    assert!(transition.tick(10_000));
    assert!(!transition.is_animating());
    assert_eq!(transition.frame(10_000).slide, 1);
}

#[test]
fn presenter_messages_follow_deck_rules() {
    let source = (1..=SLIDES)
        .map(|n| format!("# Slide {n}\n"))
        .collect::<Vec<_>>()
        .join("---\n");
    let slides = SlideDeck::from_source(Path::new("talk.md"), &source, 74).unwrap();
    let model = Model::new(slides, 0, (80, 24)).unwrap();
    let model = [Message::Advance, Message::Advance, Message::Retreat]
        .into_iter()
        .fold(model, update);
    assert_eq!(model.deck.current_index(), 1);
}

#[derive(Clone, Default)]
struct CountingCapture {
    live: Rc<Cell<i32>>,
}

impl CaptureControl for CountingCapture {
    fn enable(&mut self) -> std::io::Result<()> {
        self.live.set(self.live.get() + 1);
        Ok(())
    }

    fn disable(&mut self) -> std::io::Result<()> {
        self.live.set(self.live.get() - 1);
        Ok(())
    }
}

#[test]
fn unmount_releases_input_capture() {
    let control = CountingCapture::default();
    let live = Rc::clone(&control.live);

    let capture = InputCapture::acquire(control.clone()).unwrap();
    assert_eq!(live.get(), 1);
    drop(capture);
    assert_eq!(live.get(), 0);

    // Remounting never stacks a second listener.
    for _ in 0..3 {
        let capture = InputCapture::acquire(control.clone()).unwrap();
        assert_eq!(live.get(), 1);
        drop(capture);
    }
    assert_eq!(live.get(), 0);
}
