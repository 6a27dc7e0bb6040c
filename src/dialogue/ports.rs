//! Collaborator interfaces
//!
//! The engine drives these but never renders or plays anything itself.

use super::types::{ClipHandle, PortraitHandle};

/// What the display surface should show right now
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate<'a> {
    pub speaker_name: &'a str,
    pub visible_text: &'a str,
    pub portrait: Option<PortraitHandle>,
}

/// A dialogue box the engine writes into
pub trait DisplaySurface {
    /// Show the dialogue box
    fn open(&mut self);

    /// Hide the dialogue box
    fn close(&mut self);

    /// Replace the current contents
    fn update(&mut self, update: &DisplayUpdate<'_>);
}

/// A fire-and-forget voice player
pub trait AudioSink {
    fn play(&mut self, clip: ClipHandle, pitch: f32);
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn open(&mut self) {
        (**self).open();
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn update(&mut self, update: &DisplayUpdate<'_>) {
        (**self).update(update);
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, clip: ClipHandle, pitch: f32) {
        (**self).play(clip, pitch);
    }
}
