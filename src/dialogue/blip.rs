//! Voice blip throttling
//!
//! At most one blip per cooldown window. Clip and pitch are chosen
//! uniformly at random from the speaker's voice bank and pitch range.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::character::Character;
use super::types::{validate_duration, ClipHandle, DialogueResult, DEFAULT_BLIP_COOLDOWN};

/// A play request for the audio sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blip {
    pub clip: ClipHandle,
    pub pitch: f32,
}

/// Debounce gate for voice blips
#[derive(Debug)]
pub struct BlipThrottler {
    /// Minimum seconds between blips
    cooldown: f64,
    /// Time of the last emitted blip
    last_fire: Option<f64>,
    rng: StdRng,
}

impl Default for BlipThrottler {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_BLIP_COOLDOWN,
            last_fire: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl BlipThrottler {
    /// Create a throttler seeded from the OS
    pub fn new(cooldown: f64) -> DialogueResult<Self> {
        Ok(Self {
            cooldown: validate_duration("blip_cooldown", cooldown)?,
            last_fire: None,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create a throttler with a fixed seed
    pub fn with_seed(cooldown: f64, seed: u64) -> DialogueResult<Self> {
        Ok(Self {
            cooldown: validate_duration("blip_cooldown", cooldown)?,
            last_fire: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Get the cooldown
    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    /// Time of the last emitted blip
    pub fn last_fire(&self) -> Option<f64> {
        self.last_fire
    }

    /// Forget the last blip time
    pub fn reset(&mut self) {
        self.last_fire = None;
    }

    /// Try to fire a blip at `now` for `speaker`
    ///
    /// Returns `None` while cooling down or when there is no voice.
    pub fn try_fire(&mut self, now: f64, speaker: Option<&Character>) -> Option<Blip> {
        if let Some(last) = self.last_fire {
            if now - last < self.cooldown {
                return None;
            }
        }

        let character = speaker?;
        if character.voice_bank.is_empty() {
            return None;
        }

        let clip = character.voice_bank[self.rng.gen_range(0..character.voice_bank.len())];
        let range = character.pitch_range;
        let pitch = if range.min() < range.max() {
            self.rng.gen_range(range.min()..=range.max())
        } else {
            range.min()
        };

        self.last_fire = Some(now);
        Some(Blip { clip, pitch })
    }
}
