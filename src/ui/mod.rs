//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Shell geometry shared with mouse hit-testing
//! - [`style`]: Palette-driven line and span styles
//! - the slide frame, navigation chrome, status row and help overlay

pub mod layout;
pub mod style;

mod chrome;
mod overlays;
mod render;
mod status;

pub use layout::{Controls, HINT, HitTarget, ShellLayout, slide_content_width};
pub use overlays::help_max_scroll;
pub use render::{render, slide_lines};

#[cfg(test)]
mod tests;
