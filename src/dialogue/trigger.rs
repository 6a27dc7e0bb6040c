//! Dialogue triggers
//!
//! A trigger holds a line sequence and starts it on demand. One-shot
//! triggers remember that they have run and stay silent afterwards.

use super::engine::DialogueEngine;
use super::ports::{AudioSink, DisplaySurface};
use super::types::DialogueLine;

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueTrigger {
    lines: Vec<DialogueLine>,
    one_shot: bool,
    completed: bool,
}

impl DialogueTrigger {
    /// A trigger that may fire any number of times
    pub fn repeating(lines: Vec<DialogueLine>) -> Self {
        Self {
            lines,
            one_shot: false,
            completed: false,
        }
    }

    /// A trigger that fires once
    pub fn one_shot(lines: Vec<DialogueLine>) -> Self {
        Self {
            lines,
            one_shot: true,
            completed: false,
        }
    }

    /// Restore the "already completed" flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Start this trigger's lines on `engine`
    ///
    /// Returns true if a session was started. A one-shot trigger is only
    /// marked completed when its session actually starts.
    pub fn fire<D: DisplaySurface, A: AudioSink>(&mut self, engine: &mut DialogueEngine<D, A>) -> bool {
        if self.completed {
            return false;
        }
        let started = engine.start(self.lines.clone());
        if started && self.one_shot {
            self.completed = true;
        }
        started
    }
}
