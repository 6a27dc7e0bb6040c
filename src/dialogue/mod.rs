//! Dialogue Presentation System
//!
//! This module reveals authored dialogue lines one character at a time,
//! plays throttled voice blips, and maps a single advance input onto
//! "skip" and "next line".
//!
//! # Architecture
//!
//! The dialogue system consists of:
//! - Markup scanning (tags, pause markers, ellipses)
//! - Pacing of each revealed unit
//! - Voice blip throttling
//! - A speaker registry for portraits and voice banks
//! - The typewriter, sequencer and advance gate state machines
//!
//! # Threading
//!
//! Everything runs on the host's frame loop. Only advance signals may be
//! produced elsewhere; they go through [`crate::input::InputPort`].

pub mod blip;
pub mod character;
pub mod engine;
pub mod gate;
pub mod headless;
pub mod markup;
pub mod pacing;
pub mod ports;
pub mod sequencer;
pub mod trigger;
pub mod typewriter;
pub mod types;

pub use blip::{Blip, BlipThrottler};
pub use character::{Character, CharacterRegistry, PitchRange, Portraits};
pub use engine::DialogueEngine;
pub use gate::{AdvanceGate, GateAction, GateState};
pub use headless::{HeadlessAudio, HeadlessSurface, RecordedUpdate, SurfaceEvent};
pub use markup::{MarkupScanner, Unit};
pub use pacing::{PacingMultipliers, PacingPolicy};
pub use ports::{AudioSink, DisplaySurface, DisplayUpdate};
pub use sequencer::{AdvanceOutcome, Sequencer, Session};
pub use trigger::DialogueTrigger;
pub use typewriter::{Phase, RevealState, Typewriter};
pub use types::{
    ClipHandle, DialogueError, DialogueLine, DialogueResult, Expression, PortraitHandle,
};
