//! Dialogue input
//!
//! Advance intents reach the engine through an [`InputPort`] the host owns
//! and passes into each tick. Senders are cheap to clone and may live on
//! other threads; signals are applied in arrival order at the next tick.

pub mod advance;

pub use advance::{AdvanceSender, AdvanceSignal, InputPort};
