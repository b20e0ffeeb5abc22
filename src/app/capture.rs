//! Scoped terminal mouse capture.
//!
//! [`InputCapture`] installs capture when created and removes it when
//! dropped, so quitting, an error bubbling out of the event loop, or a panic
//! all leave the terminal without a dangling listener.

use std::io::{Write, stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

/// Installs and removes terminal input listeners.
pub trait CaptureControl {
    /// # Errors
    /// Returns an error if the terminal rejects the request.
    fn enable(&mut self) -> std::io::Result<()>;
    /// # Errors
    /// Returns an error if the terminal rejects the request.
    fn disable(&mut self) -> std::io::Result<()>;
}

/// Mouse capture on stdout.
#[derive(Debug, Default)]
pub struct CrosstermCapture;

impl CaptureControl for CrosstermCapture {
    fn enable(&mut self) -> std::io::Result<()> {
        execute!(stdout(), EnableMouseCapture)?;
        stdout().flush()
    }

    fn disable(&mut self) -> std::io::Result<()> {
        execute!(stdout(), DisableMouseCapture)?;
        stdout().flush()
    }
}

/// Holds capture for as long as it lives.
#[derive(Debug)]
pub struct InputCapture<C: CaptureControl> {
    control: C,
}

impl<C: CaptureControl> InputCapture<C> {
    /// Enable capture through `control`.
    ///
    /// # Errors
    /// Returns an error if capture cannot be enabled; nothing is left
    /// installed in that case.
    pub fn acquire(mut control: C) -> std::io::Result<Self> {
        control.enable()?;
        tracing::debug!("input.capture.acquired");
        Ok(Self { control })
    }
}

impl<C: CaptureControl> Drop for InputCapture<C> {
    fn drop(&mut self) {
        if let Err(err) = self.control.disable() {
            tracing::warn!(%err, "input.capture.release_failed");
        } else {
            tracing::debug!("input.capture.released");
        }
    }
}
