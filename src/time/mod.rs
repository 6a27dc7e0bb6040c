//! Simulation time for the dialogue system
//!
//! Reveal pacing is measured in frame time supplied by the host, so
//! freezing the clock pauses dialogue along with the rest of the game.

pub mod frame_clock;

pub use frame_clock::FrameClock;
