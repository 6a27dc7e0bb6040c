//! Reveal pacing
//!
//! Every unit costs the base delay `d`; punctuation adds extra beats and
//! pauses and ellipses override the base entirely.

use super::markup::Unit;
use super::types::{validate_duration, DialogueResult, DEFAULT_BASE_DELAY};

/// Delay multipliers, in units of the base delay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingMultipliers {
    /// Extra beats after a comma
    pub comma: f64,
    /// Extra beats after `.`, `!` or `?`
    pub terminal: f64,
    /// Extra beats after a colon
    pub colon: f64,
    /// Total beats for a pause marker
    pub pause: f64,
    /// Total beats for an ellipsis run
    pub ellipsis: f64,
}

impl Default for PacingMultipliers {
    fn default() -> Self {
        Self {
            comma: 3.0,
            terminal: 6.0,
            colon: 4.0,
            pause: 10.0,
            ellipsis: 10.0,
        }
    }
}

/// Result of pacing one unit
#[derive(Debug, Clone, PartialEq)]
pub struct Paced<'a> {
    /// Seconds to hold before the next unit
    pub delay: f64,
    /// Text appended to the visible buffer
    pub append: &'a str,
}

/// Maps scanned units to delays and appended text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingPolicy {
    base_delay: f64,
    multipliers: PacingMultipliers,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            multipliers: PacingMultipliers::default(),
        }
    }
}

impl PacingPolicy {
    /// Create a policy with default multipliers
    pub fn new(base_delay: f64) -> DialogueResult<Self> {
        Self::with_multipliers(base_delay, PacingMultipliers::default())
    }

    /// Create a policy with custom multipliers
    pub fn with_multipliers(base_delay: f64, multipliers: PacingMultipliers) -> DialogueResult<Self> {
        validate_duration("base_delay", base_delay)?;
        validate_duration("comma", multipliers.comma)?;
        validate_duration("terminal", multipliers.terminal)?;
        validate_duration("colon", multipliers.colon)?;
        validate_duration("pause", multipliers.pause)?;
        validate_duration("ellipsis", multipliers.ellipsis)?;
        Ok(Self {
            base_delay,
            multipliers,
        })
    }

    /// Get the base delay
    pub fn base_delay(&self) -> f64 {
        self.base_delay
    }

    /// Get the multipliers
    pub fn multipliers(&self) -> PacingMultipliers {
        self.multipliers
    }

    /// Delay and appended text for a unit
    ///
    /// Plain characters are encoded into `buf`.
    pub fn pace<'a>(&self, unit: &Unit<'a>, buf: &'a mut [u8; 4]) -> Paced<'a> {
        let d = self.base_delay;
        let m = &self.multipliers;
        match *unit {
            Unit::Pause => Paced {
                delay: m.pause * d,
                append: "",
            },
            Unit::Tag(run) => Paced {
                delay: 0.0,
                append: run,
            },
            Unit::Ellipsis => Paced {
                delay: m.ellipsis * d,
                append: "..",
            },
            Unit::Plain(c) => {
                let extra = match c {
                    ',' => m.comma,
                    '.' | '!' | '?' => m.terminal,
                    ':' => m.colon,
                    _ => 0.0,
                };
                Paced {
                    delay: d + extra * d,
                    append: c.encode_utf8(buf),
                }
            }
        }
    }
}
