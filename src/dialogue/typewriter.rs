//! Character-by-character line reveal
//!
//! The typewriter is a cooperative task: the host calls [`Typewriter::step`]
//! every tick with the current simulation time and the typewriter reveals
//! whatever units have come due. The only suspension point is the wait
//! between units, which [`Typewriter::skip`] cancels.

use super::markup::{MarkupScanner, Unit};
use super::pacing::PacingPolicy;

/// Typewriter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Typing,
    Done,
}

/// Per-line reveal progress
#[derive(Debug, Clone, PartialEq)]
pub struct RevealState {
    /// Raw line text
    raw: String,
    /// Text revealed so far
    visible: String,
    /// Byte offset of the next unit in `raw`
    cursor: usize,
    /// Simulation time at which the next unit is due
    resume_at: f64,
}

impl RevealState {
    pub fn visible_text(&self) -> &str {
        &self.visible
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Simulation time at which the next unit is due
    pub fn resume_at(&self) -> f64 {
        self.resume_at
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum State {
    #[default]
    Idle,
    Typing(RevealState),
    Done { visible: String },
}

/// A unit revealed by one step
#[derive(Debug, Clone, PartialEq)]
pub struct Revealed {
    /// Simulation time the unit was due
    pub at: f64,
    /// Whether the unit may trigger a voice blip
    pub voiced: bool,
    /// Bytes of raw text consumed
    pub consumed: usize,
    /// Text appended to the visible buffer
    pub appended: String,
}

/// Outcome of one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Units revealed, in order
    pub revealed: Vec<Revealed>,
    /// Whether the line finished during this step
    pub finished: bool,
}

impl StepReport {
    /// Whether anything observable changed
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty() && !self.finished
    }
}

/// Reveals one line at a time
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    scanner: MarkupScanner,
    pacing: PacingPolicy,
    state: State,
}

impl Typewriter {
    /// Create a typewriter with the given scanner and pacing
    pub fn new(scanner: MarkupScanner, pacing: PacingPolicy) -> Self {
        Self {
            scanner,
            pacing,
            state: State::Idle,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Typing(_) => Phase::Typing,
            State::Done { .. } => Phase::Done,
        }
    }

    /// Check if a line is being revealed
    pub fn is_typing(&self) -> bool {
        self.phase() == Phase::Typing
    }

    /// Live reveal state, present only while typing
    pub fn reveal_state(&self) -> Option<&RevealState> {
        match &self.state {
            State::Typing(reveal) => Some(reveal),
            _ => None,
        }
    }

    /// Text currently visible
    pub fn visible_text(&self) -> &str {
        match &self.state {
            State::Idle => "",
            State::Typing(reveal) => &reveal.visible,
            State::Done { visible } => visible,
        }
    }

    /// Get the pacing policy
    pub fn pacing(&self) -> &PacingPolicy {
        &self.pacing
    }

    /// Get the markup scanner
    pub fn scanner(&self) -> &MarkupScanner {
        &self.scanner
    }

    /// Start revealing `text`; the first unit is due at `now`
    pub fn begin(&mut self, text: &str, now: f64) {
        self.state = State::Typing(RevealState {
            raw: text.to_string(),
            visible: String::new(),
            cursor: 0,
            resume_at: now,
        });
    }

    /// Reveal every unit that has come due by `now`
    ///
    /// After a unit with delay `δ`, the next one is due `δ` later. The line
    /// finishes once the text is exhausted and the last delay has elapsed.
    pub fn step(&mut self, now: f64) -> StepReport {
        let mut report = StepReport::default();
        let State::Typing(reveal) = &mut self.state else {
            return report;
        };

        let RevealState {
            raw,
            visible,
            cursor,
            resume_at,
        } = reveal;

        while *resume_at <= now {
            let Some(scanned) = self.scanner.scan(raw, *cursor) else {
                report.finished = true;
                break;
            };

            let mut buf = [0u8; 4];
            let paced = self.pacing.pace(&scanned.unit, &mut buf);
            visible.push_str(paced.append);
            *cursor += scanned.len;

            report.revealed.push(Revealed {
                at: *resume_at,
                voiced: scanned.unit.is_voiced(),
                consumed: scanned.len,
                appended: paced.append.to_string(),
            });
            *resume_at += paced.delay;

            if matches!(scanned.unit, Unit::Pause) {
                log::trace!("pause until {:.3}", resume_at);
            }
        }

        if report.finished {
            let visible = std::mem::take(visible);
            self.state = State::Done { visible };
        }
        report
    }

    /// Finish the line immediately
    ///
    /// Shows the raw text minus pause markers. Ellipses are not collapsed.
    /// Returns false outside `Typing`.
    pub fn skip(&mut self) -> bool {
        let State::Typing(reveal) = &self.state else {
            return false;
        };
        let visible = self.scanner.strip_pauses(&reveal.raw);
        self.state = State::Done { visible };
        true
    }

    /// Drop any line and return to `Idle`
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}
