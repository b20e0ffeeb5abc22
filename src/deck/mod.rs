//! Slide-deck navigation state.
//!
//! [`Deck`] owns the current slide index and is the only place that index
//! changes. Every operation keeps `current_index < slide_count`:
//! - [`Deck::advance`] / [`Deck::retreat`] saturate at the last / first slide
//! - [`Deck::goto`] rejects out-of-range targets and leaves state unchanged
//! - [`Deck::home`] / [`Deck::last`] jump to either end
//!
//! [`transition`] sequences the visual swap between panels when the index
//! changes.

pub mod transition;

pub use transition::{DEFAULT_TRANSITION_MS, Phase, TransitionFrame, TransitionSequencer};

use thiserror::Error;

/// Errors reported by deck construction and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// A deck needs at least one slide.
    #[error("a deck needs at least one slide")]
    Empty,
    /// A jump target outside `0..slide_count`.
    #[error("slide {} is out of range (deck has {slide_count} slides)", .index + 1)]
    InvalidIndex { index: usize, slide_count: usize },
}

/// Current position within a fixed-size deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    slide_count: usize,
    current_index: usize,
}

impl Default for Deck {
    /// A single-slide deck.
    fn default() -> Self {
        Self {
            slide_count: 1,
            current_index: 0,
        }
    }
}

impl Deck {
    /// Create a deck positioned on the first slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] when `slide_count` is zero.
    pub const fn new(slide_count: usize) -> Result<Self, DeckError> {
        if slide_count == 0 {
            return Err(DeckError::Empty);
        }
        Ok(Self {
            slide_count,
            current_index: 0,
        })
    }

    /// Create a deck positioned on `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] for an empty deck and
    /// [`DeckError::InvalidIndex`] when `index` is past the last slide.
    pub fn starting_at(slide_count: usize, index: usize) -> Result<Self, DeckError> {
        let mut deck = Self::new(slide_count)?;
        deck.goto(index)?;
        Ok(deck)
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub const fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub const fn is_last(&self) -> bool {
        self.current_index + 1 == self.slide_count
    }

    /// Move to the next slide. Returns false on the last slide.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_index += 1;
        tracing::debug!(index = self.current_index, "deck.advance");
        true
    }

    /// Move to the previous slide. Returns false on the first slide.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current_index -= 1;
        tracing::debug!(index = self.current_index, "deck.retreat");
        true
    }

    /// Jump directly to `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidIndex`] when `index >= slide_count`; the
    /// current index is left untouched.
    pub fn goto(&mut self, index: usize) -> Result<(), DeckError> {
        if index >= self.slide_count {
            tracing::warn!(index, slide_count = self.slide_count, "deck.goto rejected");
            return Err(DeckError::InvalidIndex {
                index,
                slide_count: self.slide_count,
            });
        }
        self.current_index = index;
        tracing::debug!(index, "deck.goto");
        Ok(())
    }

    /// Jump to the first slide.
    pub fn home(&mut self) {
        self.current_index = 0;
        tracing::debug!("deck.home");
    }

    /// Jump to the last slide.
    pub fn last(&mut self) {
        self.current_index = self.slide_count - 1;
        tracing::debug!(index = self.current_index, "deck.last");
    }

    /// Percentage of the deck shown so far, counting the current slide.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.slide_count as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Advance,
        Retreat,
        Goto(usize),
        Home,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Advance),
            Just(Op::Retreat),
            (0usize..40).prop_map(Op::Goto),
            Just(Op::Home),
        ]
    }

    #[test]
    fn test_new_deck_starts_on_first_slide() {
        let deck = Deck::new(14).unwrap();
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.slide_count(), 14);
        assert!(deck.is_first());
        assert!(!deck.is_last());
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert_eq!(Deck::new(0), Err(DeckError::Empty));
    }

    #[test]
    fn test_single_slide_deck_is_first_and_last() {
        let mut deck = Deck::new(1).unwrap();
        assert!(deck.is_first());
        assert!(deck.is_last());
        assert!(!deck.advance());
        assert!(!deck.retreat());
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn test_advance_saturates_at_last_slide() {
        let mut deck = Deck::new(14).unwrap();
        for _ in 0..13 {
            assert!(deck.advance());
        }
        assert_eq!(deck.current_index(), 13);
        assert!(!deck.advance());
        assert_eq!(deck.current_index(), 13);
    }

    #[test]
    fn test_retreat_saturates_at_first_slide() {
        let mut deck = Deck::starting_at(14, 13).unwrap();
        for _ in 0..13 {
            assert!(deck.retreat());
        }
        assert_eq!(deck.current_index(), 0);
        assert!(!deck.retreat());
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn test_goto_out_of_range_is_rejected_without_moving() {
        let mut deck = Deck::starting_at(14, 5).unwrap();
        assert_eq!(
            deck.goto(14),
            Err(DeckError::InvalidIndex {
                index: 14,
                slide_count: 14
            })
        );
        assert!(deck.goto(usize::MAX).is_err());
        assert_eq!(deck.current_index(), 5);
    }

    #[test]
    fn test_goto_accepts_both_boundaries() {
        let mut deck = Deck::new(14).unwrap();
        deck.goto(13).unwrap();
        assert_eq!(deck.current_index(), 13);
        deck.goto(0).unwrap();
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn test_starting_at_rejects_out_of_range() {
        assert!(matches!(
            Deck::starting_at(3, 3),
            Err(DeckError::InvalidIndex { index: 3, .. })
        ));
    }

    #[test]
    fn test_last_jumps_to_final_slide() {
        let mut deck = Deck::new(14).unwrap();
        deck.last();
        assert_eq!(deck.current_index(), 13);
        assert!(deck.is_last());
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_home_and_last_are_logged() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let mut deck = Deck::starting_at(14, 5).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            deck.last();
            deck.home();
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("deck.last index=13"), "{output}");
        assert!(output.contains("deck.home"), "{output}");
    }

    #[test]
    fn test_progress_percent_counts_current_slide() {
        let mut deck = Deck::new(4).unwrap();
        assert!((deck.progress_percent() - 25.0).abs() < f64::EPSILON);
        deck.last();
        assert!((deck.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_index_message_is_one_based() {
        let err = DeckError::InvalidIndex {
            index: 19,
            slide_count: 14,
        };
        assert_eq!(err.to_string(), "slide 20 is out of range (deck has 14 slides)");
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_range(count in 1usize..30, ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut deck = Deck::new(count).unwrap();
            for op in ops {
                let before = deck.current_index();
                match op {
                    Op::Advance => {
                        let moved = deck.advance();
                        prop_assert_eq!(moved, before + 1 < count);
                        prop_assert_eq!(deck.current_index(), if moved { before + 1 } else { before });
                    }
                    Op::Retreat => {
                        let moved = deck.retreat();
                        prop_assert_eq!(moved, before > 0);
                        prop_assert_eq!(deck.current_index(), if moved { before - 1 } else { before });
                    }
                    Op::Goto(target) => {
                        if deck.goto(target).is_ok() {
                            prop_assert_eq!(deck.current_index(), target);
                        } else {
                            prop_assert!(target >= count);
                            prop_assert_eq!(deck.current_index(), before);
                        }
                    }
                    Op::Home => {
                        let mut via_goto = deck;
                        via_goto.goto(0).unwrap();
                        deck.home();
                        prop_assert_eq!(deck, via_goto);
                    }
                }
                prop_assert!(deck.current_index() < count);
            }
        }

        #[test]
        fn prop_boundary_navigation_is_idempotent(count in 1usize..30, repeats in 0usize..20) {
            let mut deck = Deck::new(count).unwrap();
            deck.last();
            for _ in 0..repeats {
                deck.advance();
            }
            prop_assert_eq!(deck.current_index(), count - 1);

            deck.home();
            for _ in 0..repeats {
                deck.retreat();
            }
            prop_assert_eq!(deck.current_index(), 0);
        }
    }
}
