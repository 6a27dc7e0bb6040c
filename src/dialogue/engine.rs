//! Per-tick dialogue orchestration
//!
//! Wires the sequencer, typewriter, gate and blip throttler to the display
//! surface and audio sink, and advances them from the host's frame loop.

use super::blip::BlipThrottler;
use super::character::CharacterRegistry;
use super::gate::{AdvanceGate, GateAction, GateState};
use super::ports::{AudioSink, DisplaySurface, DisplayUpdate};
use super::sequencer::{AdvanceOutcome, Sequencer};
use super::typewriter::{Phase, Typewriter};
use super::types::{DialogueLine, PortraitHandle};
use crate::input::InputPort;
use crate::time::FrameClock;

/// Speaker name and portrait resolved when a line begins
#[derive(Debug, Clone, PartialEq)]
struct LineView {
    speaker_name: String,
    portrait: Option<PortraitHandle>,
}

/// The dialogue presentation engine
#[derive(Debug)]
pub struct DialogueEngine<D: DisplaySurface, A: AudioSink> {
    registry: CharacterRegistry,
    sequencer: Sequencer,
    gate: AdvanceGate,
    throttler: BlipThrottler,
    clock: FrameClock,
    view: Option<LineView>,
    display: D,
    audio: A,
}

impl<D: DisplaySurface, A: AudioSink> DialogueEngine<D, A> {
    /// Create an engine
    pub fn new(
        registry: CharacterRegistry,
        typewriter: Typewriter,
        throttler: BlipThrottler,
        display: D,
        audio: A,
    ) -> Self {
        Self {
            registry,
            sequencer: Sequencer::new(typewriter),
            gate: AdvanceGate::new(),
            throttler,
            clock: FrameClock::new(),
            view: None,
            display,
            audio,
        }
    }

    /// Check if a session is active
    pub fn is_active(&self) -> bool {
        self.sequencer.is_active()
    }

    /// Current typewriter phase
    pub fn phase(&self) -> Phase {
        self.sequencer.typewriter().phase()
    }

    /// Current gate state
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Text currently visible
    pub fn visible_text(&self) -> &str {
        self.sequencer.typewriter().visible_text()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    pub fn throttler(&self) -> &BlipThrottler {
        &self.throttler
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Get mutable clock, e.g. to lock it while the game is paused
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Start a session
    ///
    /// Ignored if a session is active or `lines` is empty.
    pub fn start(&mut self, lines: Vec<DialogueLine>) -> bool {
        if !self.sequencer.start(lines, self.clock.now()) {
            return false;
        }

        log::debug!("dialogue session started ({} lines)", self.sequencer.len());
        self.gate.session_started();
        self.display.open();
        self.enter_line();
        true
    }

    /// End the active session immediately
    pub fn abort(&mut self) -> bool {
        if !self.sequencer.abort() {
            return false;
        }
        log::debug!("dialogue session aborted");
        self.finish_session();
        true
    }

    /// Apply one advance signal
    pub fn handle_advance(&mut self) -> GateAction {
        let action = self.gate.on_advance(self.phase());
        match action {
            GateAction::Ignore => {}
            GateAction::Skip => {
                if self.sequencer.typewriter_mut().skip() {
                    self.push_update();
                }
            }
            GateAction::Advance => match self.sequencer.advance(self.clock.now()) {
                AdvanceOutcome::NextLine(index) => {
                    log::debug!("dialogue line {}", index);
                    self.enter_line();
                }
                AdvanceOutcome::Ended => {
                    log::debug!("dialogue session finished");
                    self.finish_session();
                }
                AdvanceOutcome::Ignored => {}
            },
        }
        action
    }

    /// Run one host frame
    ///
    /// Advances the clock by `delta` seconds, applies the advance signals
    /// queued before this call in order, then reveals whatever has come due.
    pub fn tick(&mut self, delta: f64, input: &InputPort) {
        self.clock.advance(delta);
        for _ in 0..input.take_pending() {
            self.handle_advance();
        }
        self.reveal_due();
    }

    fn enter_line(&mut self) {
        let speaker_name = match self.sequencer.current_character(&self.registry) {
            Some(character) => character.display_name.clone(),
            None => self
                .sequencer
                .current_line()
                .map(|line| line.speaker_id.clone())
                .unwrap_or_default(),
        };
        let portrait = self.sequencer.current_portrait(&self.registry);
        self.view = Some(LineView {
            speaker_name,
            portrait,
        });

        self.push_update();
        self.reveal_due();
    }

    fn reveal_due(&mut self) {
        let now = self.clock.now();
        let before = self.sequencer.typewriter().visible_text().to_string();
        let report = self.sequencer.typewriter_mut().step(now);
        if report.is_empty() {
            return;
        }

        let speaker = self.sequencer.current_character(&self.registry);
        let mut visible = before;
        for unit in &report.revealed {
            if unit.voiced {
                if let Some(blip) = self.throttler.try_fire(now, speaker) {
                    self.audio.play(blip.clip, blip.pitch);
                }
            }
            if unit.appended.is_empty() {
                continue;
            }
            visible.push_str(&unit.appended);
            if let Some(view) = &self.view {
                self.display.update(&DisplayUpdate {
                    speaker_name: &view.speaker_name,
                    visible_text: &visible,
                    portrait: view.portrait,
                });
            }
        }
    }

    fn push_update(&mut self) {
        if let Some(view) = &self.view {
            self.display.update(&DisplayUpdate {
                speaker_name: &view.speaker_name,
                visible_text: self.sequencer.typewriter().visible_text(),
                portrait: view.portrait,
            });
        }
    }

    fn finish_session(&mut self) {
        self.gate.session_ended();
        self.throttler.reset();
        self.view = None;
        self.display.close();
    }
}
