//! Exit-then-enter sequencing for slide swaps.
//!
//! A transition is keyed by the target slide index. Only one panel is ever
//! visible: the outgoing panel plays its exit half, then the incoming panel
//! plays its enter half. New requests supersede whatever is in flight, so
//! the settled slide always matches the latest requested index.

/// Full exit-plus-enter length used when none is configured.
pub const DEFAULT_TRANSITION_MS: u64 = 400;

/// Which half of a transition is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The visible panel is leaving.
    Exit,
    /// The visible panel is arriving.
    Enter,
}

/// What to draw at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// The single slide index to draw.
    pub slide: usize,
    /// `None` when settled.
    pub phase: Option<Phase>,
    /// Progress through the current phase in `0.0..=1.0`.
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    shown: usize,
    target: usize,
    phase: Phase,
    phase_started_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TransitionSequencer {
    phase_ms: u64,
    settled: usize,
    in_flight: Option<InFlight>,
}

impl TransitionSequencer {
    /// Create a sequencer settled on `initial`.
    ///
    /// `duration_ms` covers both halves; zero disables animation.
    pub const fn new(initial: usize, duration_ms: u64) -> Self {
        Self {
            phase_ms: duration_ms / 2,
            settled: initial,
            in_flight: None,
        }
    }

    pub const fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The slide the sequencer will settle on.
    pub fn target(&self) -> usize {
        self.in_flight.map_or(self.settled, |f| f.target)
    }

    /// Drop any in-flight swap and show `index` immediately.
    pub fn settle_on(&mut self, index: usize) {
        self.settled = index;
        self.in_flight = None;
    }

    /// Request a swap to `target`.
    pub fn request(&mut self, target: usize, now_ms: u64) {
        if self.phase_ms == 0 {
            self.settled = target;
            self.in_flight = None;
            return;
        }
        match self.in_flight {
            None => {
                if target != self.settled {
                    tracing::debug!(from = self.settled, to = target, "transition.start");
                    self.in_flight = Some(InFlight {
                        shown: self.settled,
                        target,
                        phase: Phase::Exit,
                        phase_started_ms: now_ms,
                    });
                }
            }
            Some(mut flight) => match flight.phase {
                Phase::Exit if target == flight.shown => {
                    tracing::debug!(slide = target, "transition.cancel");
                    self.settled = flight.shown;
                    self.in_flight = None;
                }
                Phase::Exit => {
                    flight.target = target;
                    self.in_flight = Some(flight);
                }
                Phase::Enter if target == flight.target => {}
                Phase::Enter => {
                    tracing::debug!(stale = flight.target, to = target, "transition.supersede");
                    self.in_flight = Some(InFlight {
                        shown: flight.target,
                        target,
                        phase: Phase::Exit,
                        phase_started_ms: now_ms,
                    });
                }
            },
        }
    }

    /// Advance phases whose time is up. Returns true when the visible frame
    /// changed phase or settled.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(mut flight) = self.in_flight else {
            return false;
        };
        let mut changed = false;
        while now_ms.saturating_sub(flight.phase_started_ms) >= self.phase_ms {
            changed = true;
            match flight.phase {
                Phase::Exit => {
                    flight.phase = Phase::Enter;
                    flight.shown = flight.target;
                    flight.phase_started_ms += self.phase_ms;
                }
                Phase::Enter => {
                    tracing::debug!(slide = flight.target, "transition.settled");
                    self.settled = flight.target;
                    self.in_flight = None;
                    return true;
                }
            }
        }
        self.in_flight = Some(flight);
        changed
    }

    /// The frame to draw at `now_ms`.
    #[allow(clippy::cast_precision_loss)]
    pub fn frame(&self, now_ms: u64) -> TransitionFrame {
        match self.in_flight {
            None => TransitionFrame {
                slide: self.settled,
                phase: None,
                progress: 1.0,
            },
            Some(flight) => {
                let elapsed = now_ms.saturating_sub(flight.phase_started_ms);
                let progress = (elapsed as f32 / self.phase_ms as f32).clamp(0.0, 1.0);
                TransitionFrame {
                    slide: flight.shown,
                    phase: Some(flight.phase),
                    progress,
                }
            }
        }
    }
}
