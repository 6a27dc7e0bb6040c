//! Core types for the dialogue system

/// Error type for dialogue operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DialogueError {
    /// A speaker id was registered twice
    #[error("Speaker already registered: {0}")]
    DuplicateSpeaker(String),

    /// Pitch range is inverted or not finite
    #[error("Invalid pitch range: [{min}, {max}]")]
    InvalidPitchRange { min: f32, max: f32 },

    /// A delay or cooldown is negative or not finite
    #[error("Invalid duration for {name}: {value}")]
    InvalidDuration { name: &'static str, value: f64 },

    /// Two markup markers share a character
    #[error("Markup markers must differ, '{0}' is used twice")]
    MarkerClash(char),
}

/// Result type for dialogue operations
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Host-owned portrait sprite reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortraitHandle(pub u32);

/// Host-owned voice clip reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u32);

/// Facial expression shown with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    #[default]
    Neutral,
    Happy,
    Angry,
    Sad,
}

impl Expression {
    /// Parse an expression name; unknown names fall back to `Neutral`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "happy" => Expression::Happy,
            "angry" => Expression::Angry,
            "sad" => Expression::Sad,
            _ => Expression::Neutral,
        }
    }
}

/// One authored line of dialogue
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    /// Speaker id, resolved through the character registry
    pub speaker_id: String,
    /// Raw text, may embed tags and pause markers
    pub text: String,
    /// Whether the speaker's portrait is shown for this line
    pub show_portrait: bool,
    /// Expression used to pick the portrait
    pub expression: Expression,
}

impl DialogueLine {
    /// Create a line with a neutral portrait
    pub fn new(speaker_id: &str, text: &str) -> Self {
        Self {
            speaker_id: speaker_id.to_string(),
            text: text.to_string(),
            show_portrait: true,
            expression: Expression::Neutral,
        }
    }

    /// Set the expression
    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = expression;
        self
    }

    /// Hide the portrait for this line
    pub fn without_portrait(mut self) -> Self {
        self.show_portrait = false;
        self
    }
}

/// Default base delay between revealed units, in seconds
pub const DEFAULT_BASE_DELAY: f64 = 0.03;

/// Default minimum interval between voice blips, in seconds
pub const DEFAULT_BLIP_COOLDOWN: f64 = 0.1;

/// Check that a duration is finite and non-negative
pub fn validate_duration(name: &'static str, value: f64) -> DialogueResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DialogueError::InvalidDuration { name, value });
    }
    Ok(value)
}
