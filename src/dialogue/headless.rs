//! Headless collaborators
//!
//! A display surface and audio sink that record what they are told and
//! echo it to the log. Used by the demo runner and in tests.

use super::blip::Blip;
use super::ports::{AudioSink, DisplaySurface, DisplayUpdate};
use super::types::{ClipHandle, PortraitHandle};

/// One call received by the headless surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Opened,
    Closed,
    Updated(RecordedUpdate),
}

/// Owned copy of a display update
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub speaker_name: String,
    pub visible_text: String,
    pub portrait: Option<PortraitHandle>,
}

/// Display surface that records every call
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    open: bool,
    events: Vec<SurfaceEvent>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the dialogue box is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// All recorded calls, in order
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Most recent update
    pub fn last_update(&self) -> Option<&RecordedUpdate> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Updated(update) => Some(update),
            _ => None,
        })
    }

    /// Visible text of every update, in order
    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Updated(update) => Some(update.visible_text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplaySurface for HeadlessSurface {
    fn open(&mut self) {
        log::info!("[dialogue] open");
        self.open = true;
        self.events.push(SurfaceEvent::Opened);
    }

    fn close(&mut self) {
        log::info!("[dialogue] close");
        self.open = false;
        self.events.push(SurfaceEvent::Closed);
    }

    fn update(&mut self, update: &DisplayUpdate<'_>) {
        log::debug!(
            "[dialogue] {}: {}",
            update.speaker_name,
            update.visible_text
        );
        self.events.push(SurfaceEvent::Updated(RecordedUpdate {
            speaker_name: update.speaker_name.to_string(),
            visible_text: update.visible_text.to_string(),
            portrait: update.portrait,
        }));
    }
}

/// Audio sink that records every play request
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    plays: Vec<Blip>,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// All play requests, in order
    pub fn plays(&self) -> &[Blip] {
        &self.plays
    }
}

impl AudioSink for HeadlessAudio {
    fn play(&mut self, clip: ClipHandle, pitch: f32) {
        log::trace!("[blip] clip {} pitch {:.2}", clip.0, pitch);
        self.plays.push(Blip { clip, pitch });
    }
}
