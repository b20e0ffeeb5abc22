// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. deck::DeckError)
    clippy::module_name_repetitions
)]

//! # Lectern
//!
//! A terminal slide-deck presenter.
//!
//! Lectern presents a markdown deck one slide at a time with:
//! - Keyboard and mouse navigation with saturating prev/next
//! - Exit-then-enter transitions where the latest request wins
//! - A progress bar, navigation controls and dot indicators
//! - Syntax-highlighted code panels and CSV sheet panels
//! - File watching for live reload while authoring
//!
//! ## Architecture
//!
//! Lectern uses The Elm Architecture (TEA) pattern:
//! - **Model**: Presenter state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`deck`]: Current-slide state and transition sequencing
//! - [`slides`]: Deck file splitting and panel rendering
//! - [`app`]: Main event loop, input binding and state
//! - [`ui`]: Layout shell and terminal widgets
//! - [`theme`]: Presentation color tokens
//! - [`highlight`]: Syntax highlighting
//! - [`config`]: Persistent command-line defaults
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod deck;
pub mod highlight;
pub mod slides;
pub mod theme;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::deck::{Deck, DeckError, TransitionSequencer};
    pub use crate::slides::{Slide, SlideDeck};
    pub use crate::theme::Palette;
}
