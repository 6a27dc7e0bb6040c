//! Speaker registry
//!
//! Maps speaker ids to display names, portraits and voice banks.

use std::collections::HashMap;

use super::types::{ClipHandle, DialogueError, DialogueResult, Expression, PortraitHandle};

/// Portrait sprites for each expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portraits {
    pub neutral: Option<PortraitHandle>,
    pub happy: Option<PortraitHandle>,
    pub angry: Option<PortraitHandle>,
    pub sad: Option<PortraitHandle>,
}

impl Portraits {
    /// Sprite slot for an expression
    pub fn for_expression(&self, expression: Expression) -> Option<PortraitHandle> {
        match expression {
            Expression::Neutral => self.neutral,
            Expression::Happy => self.happy,
            Expression::Angry => self.angry,
            Expression::Sad => self.sad,
        }
    }
}

/// Inclusive pitch range for voice blips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchRange {
    min: f32,
    max: f32,
}

impl Default for PitchRange {
    fn default() -> Self {
        Self { min: 1.0, max: 1.0 }
    }
}

impl PitchRange {
    /// Create a range; `min` must not exceed `max`
    pub fn new(min: f32, max: f32) -> DialogueResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DialogueError::InvalidPitchRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

/// A registered speaker
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Id referenced by dialogue lines
    pub speaker_id: String,
    /// Name shown on the display surface
    pub display_name: String,
    /// Portrait set
    pub portraits: Portraits,
    /// Voice clips, picked uniformly per blip
    pub voice_bank: Vec<ClipHandle>,
    /// Pitch range for blips
    pub pitch_range: PitchRange,
}

impl Character {
    /// Create a character with no portraits and no voice
    pub fn new(speaker_id: &str, display_name: &str) -> Self {
        Self {
            speaker_id: speaker_id.to_string(),
            display_name: display_name.to_string(),
            portraits: Portraits::default(),
            voice_bank: Vec::new(),
            pitch_range: PitchRange::default(),
        }
    }

    /// Set the portrait set
    pub fn with_portraits(mut self, portraits: Portraits) -> Self {
        self.portraits = portraits;
        self
    }

    /// Set the voice bank and pitch range
    pub fn with_voice(mut self, voice_bank: Vec<ClipHandle>, pitch_range: PitchRange) -> Self {
        self.voice_bank = voice_bank;
        self.pitch_range = pitch_range;
        self
    }

    /// Portrait for an expression, if that slot is filled
    pub fn portrait(&self, expression: Expression) -> Option<PortraitHandle> {
        self.portraits.for_expression(expression)
    }
}

/// Lookup table of speakers, loaded at startup
#[derive(Debug, Default)]
pub struct CharacterRegistry {
    characters: HashMap<String, Character>,
}

impl CharacterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character
    ///
    /// Fails if the speaker id is already taken.
    pub fn register(&mut self, character: Character) -> DialogueResult<()> {
        if self.characters.contains_key(&character.speaker_id) {
            return Err(DialogueError::DuplicateSpeaker(character.speaker_id));
        }
        self.characters
            .insert(character.speaker_id.clone(), character);
        Ok(())
    }

    /// Look up a speaker; absence is not an error
    pub fn resolve(&self, speaker_id: &str) -> Option<&Character> {
        self.characters.get(speaker_id)
    }

    /// Number of registered speakers
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Check if no speakers are registered
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Registered speaker ids, sorted
    pub fn speakers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.characters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<Character> for CharacterRegistry {
    /// Collect characters; later duplicates are dropped with a warning
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        let mut registry = Self::new();
        for character in iter {
            if let Err(err) = registry.register(character) {
                log::warn!("{}", err);
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Character {
        Character::new("ada", "Ada").with_portraits(Portraits {
            neutral: Some(PortraitHandle(1)),
            happy: Some(PortraitHandle(2)),
            angry: None,
            sad: Some(PortraitHandle(4)),
        })
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CharacterRegistry::new();
        registry.register(ada()).unwrap();

        let found = registry.resolve("ada").unwrap();
        assert_eq!(found.display_name, "Ada");
        assert!(registry.resolve("bob").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_speaker() {
        let mut registry = CharacterRegistry::new();
        registry.register(ada()).unwrap();
        assert_eq!(
            registry.register(ada()),
            Err(DialogueError::DuplicateSpeaker("ada".into()))
        );
    }

    #[test]
    fn test_portrait_for_expression() {
        let character = ada();
        assert_eq!(character.portrait(Expression::Neutral), Some(PortraitHandle(1)));
        assert_eq!(character.portrait(Expression::Happy), Some(PortraitHandle(2)));
        assert_eq!(character.portrait(Expression::Angry), None);
        assert_eq!(character.portrait(Expression::Sad), Some(PortraitHandle(4)));
    }

    #[test]
    fn test_pitch_range_validation() {
        assert!(PitchRange::new(0.9, 1.1).is_ok());
        assert!(PitchRange::new(1.0, 1.0).is_ok());
        assert!(PitchRange::new(1.2, 0.8).is_err());
        assert!(PitchRange::new(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_from_iter_skips_duplicates() {
        let registry: CharacterRegistry =
            vec![ada(), Character::new("bob", "Bob"), ada()].into_iter().collect();
        assert_eq!(registry.speakers(), vec!["ada", "bob"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CharacterRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("anyone").is_none());
    }
}
