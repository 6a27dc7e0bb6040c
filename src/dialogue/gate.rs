//! Advance input gate
//!
//! One payload-free input means "skip" while a line is typing and "next
//! line" once it is done.

use super::typewriter::Phase;

/// Gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    NoSession,
    AwaitingInput,
}

/// What an advance signal should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Ignore,
    Skip,
    Advance,
}

/// Translates advance signals into typewriter or sequencer calls
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceGate {
    state: GateState,
}

impl AdvanceGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// A session started
    pub fn session_started(&mut self) {
        self.state = GateState::AwaitingInput;
    }

    /// The session ended or was aborted
    pub fn session_ended(&mut self) {
        self.state = GateState::NoSession;
    }

    /// Decide what one advance signal does, given the typewriter phase
    pub fn on_advance(&self, phase: Phase) -> GateAction {
        match (self.state, phase) {
            (GateState::NoSession, _) => GateAction::Ignore,
            (GateState::AwaitingInput, Phase::Typing) => GateAction::Skip,
            (GateState::AwaitingInput, Phase::Done) => GateAction::Advance,
            (GateState::AwaitingInput, Phase::Idle) => GateAction::Ignore,
        }
    }
}
