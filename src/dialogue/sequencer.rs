//! Line sequencing
//!
//! Owns the session's line buffer and position, and hands each line to the
//! typewriter in turn.

use super::character::{Character, CharacterRegistry};
use super::typewriter::{Phase, Typewriter};
use super::types::{DialogueLine, PortraitHandle};

/// One run through an ordered line sequence
///
/// While inactive, `lines` is empty and `index` is 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    lines: Vec<DialogueLine>,
    index: usize,
    active: bool,
}

impl Session {
    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Line at the current index, while active
    pub fn current_line(&self) -> Option<&DialogueLine> {
        if self.active {
            self.lines.get(self.index)
        } else {
            None
        }
    }

    fn end(&mut self) {
        *self = Session::default();
    }
}

/// Result of an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// No session, or the current line is still typing
    Ignored,
    /// The typewriter began the line at this index
    NextLine(usize),
    /// The last line was passed and the session ended
    Ended,
}

/// Drives the typewriter through a session's lines
#[derive(Debug, Default)]
pub struct Sequencer {
    session: Session,
    typewriter: Typewriter,
}

impl Sequencer {
    /// Create a sequencer around a typewriter
    pub fn new(typewriter: Typewriter) -> Self {
        Self {
            session: Session::default(),
            typewriter,
        }
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the typewriter
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Get mutable typewriter
    pub fn typewriter_mut(&mut self) -> &mut Typewriter {
        &mut self.typewriter
    }

    /// Check if a session is active
    pub fn is_active(&self) -> bool {
        self.session.active
    }

    /// Current line index
    pub fn index(&self) -> usize {
        self.session.index
    }

    /// Number of lines in the session
    pub fn len(&self) -> usize {
        self.session.lines.len()
    }

    /// Check if the line buffer is empty
    pub fn is_empty(&self) -> bool {
        self.session.lines.is_empty()
    }

    /// Current line, while active
    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.session.current_line()
    }

    /// Start a session and begin line 0
    ///
    /// Returns false, changing nothing, if a session is already active or
    /// `lines` is empty.
    pub fn start(&mut self, lines: Vec<DialogueLine>, now: f64) -> bool {
        if self.session.active {
            log::debug!("start ignored: session already active");
            return false;
        }
        if lines.is_empty() {
            log::debug!("start ignored: no lines");
            return false;
        }

        self.session = Session {
            lines,
            index: 0,
            active: true,
        };
        self.begin_current(now);
        true
    }

    /// Move to the next line once the current one is done
    pub fn advance(&mut self, now: f64) -> AdvanceOutcome {
        if !self.session.active || self.typewriter.phase() != Phase::Done {
            return AdvanceOutcome::Ignored;
        }

        self.session.index += 1;
        if self.session.index < self.session.lines.len() {
            self.begin_current(now);
            AdvanceOutcome::NextLine(self.session.index)
        } else {
            self.end();
            AdvanceOutcome::Ended
        }
    }

    /// End the active session immediately
    ///
    /// Returns false if no session was active.
    pub fn abort(&mut self) -> bool {
        if !self.session.active {
            return false;
        }
        self.end();
        true
    }

    /// Resolve the current line's speaker
    pub fn current_character<'r>(&self, registry: &'r CharacterRegistry) -> Option<&'r Character> {
        let line = self.current_line()?;
        let character = registry.resolve(&line.speaker_id);
        if character.is_none() {
            log::debug!("no character registered for speaker '{}'", line.speaker_id);
        }
        character
    }

    /// Portrait for the current line
    ///
    /// Present only if the line shows a portrait, the speaker resolves, and
    /// the expression slot is filled.
    pub fn current_portrait(&self, registry: &CharacterRegistry) -> Option<PortraitHandle> {
        let line = self.current_line()?;
        if !line.show_portrait {
            return None;
        }
        self.current_character(registry)?
            .portrait(line.expression)
    }

    fn begin_current(&mut self, now: f64) {
        if let Some(line) = self.session.current_line() {
            self.typewriter.begin(&line.text, now);
        }
    }

    fn end(&mut self) {
        self.session.end();
        self.typewriter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::character::Portraits;
    use crate::dialogue::types::Expression;

    fn lines(n: usize) -> Vec<DialogueLine> {
        (0..n)
            .map(|i| DialogueLine::new("ada", &format!("line {}", i)))
            .collect()
    }

    fn finish(seq: &mut Sequencer) {
        seq.typewriter_mut().skip();
    }

    #[test]
    fn test_start_begins_first_line() {
        let mut seq = Sequencer::default();
        assert!(seq.start(lines(2), 0.0));
        assert!(seq.is_active());
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.typewriter().phase(), Phase::Typing);
    }

    #[test]
    fn test_start_empty_is_ignored() {
        let mut seq = Sequencer::default();
        assert!(!seq.start(Vec::new(), 0.0));
        assert!(!seq.is_active());
        assert_eq!(seq.typewriter().phase(), Phase::Idle);
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let mut seq = Sequencer::default();
        seq.start(lines(2), 0.0);
        finish(&mut seq);
        let before = seq.session().clone();

        assert!(!seq.start(lines(5), 1.0));
        assert_eq!(seq.session(), &before);
        assert_eq!(seq.typewriter().phase(), Phase::Done);
    }

    #[test]
    fn test_advance_while_typing_is_ignored() {
        let mut seq = Sequencer::default();
        seq.start(lines(2), 0.0);
        assert_eq!(seq.advance(0.0), AdvanceOutcome::Ignored);
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn test_advance_through_session() {
        let mut seq = Sequencer::default();
        seq.start(lines(2), 0.0);

        finish(&mut seq);
        assert_eq!(seq.advance(0.0), AdvanceOutcome::NextLine(1));
        assert_eq!(seq.typewriter().phase(), Phase::Typing);

        finish(&mut seq);
        assert_eq!(seq.advance(0.0), AdvanceOutcome::Ended);
        assert!(!seq.is_active());
        assert!(seq.is_empty());
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.typewriter().phase(), Phase::Idle);
    }

    #[test]
    fn test_advance_without_session() {
        let mut seq = Sequencer::default();
        assert_eq!(seq.advance(0.0), AdvanceOutcome::Ignored);
    }

    #[test]
    fn test_abort() {
        let mut seq = Sequencer::default();
        seq.start(lines(3), 0.0);
        assert!(seq.abort());
        assert!(!seq.is_active());
        assert!(seq.current_line().is_none());
        assert!(!seq.abort());
        assert!(seq.start(lines(1), 0.0));
    }

    #[test]
    fn test_current_portrait() {
        let mut registry = CharacterRegistry::new();
        registry
            .register(Character::new("ada", "Ada").with_portraits(Portraits {
                neutral: Some(PortraitHandle(1)),
                happy: None,
                ..Portraits::default()
            }))
            .unwrap();

        let script = vec![
            DialogueLine::new("ada", "a"),
            DialogueLine::new("ada", "b").with_expression(Expression::Happy),
            DialogueLine::new("ada", "c").without_portrait(),
            DialogueLine::new("zed", "d"),
        ];
        let mut seq = Sequencer::default();
        seq.start(script, 0.0);

        assert_eq!(seq.current_portrait(&registry), Some(PortraitHandle(1)));
        finish(&mut seq);
        seq.advance(0.0);
        assert_eq!(seq.current_portrait(&registry), None);
        finish(&mut seq);
        seq.advance(0.0);
        assert_eq!(seq.current_portrait(&registry), None);
        finish(&mut seq);
        seq.advance(0.0);
        assert!(seq.current_character(&registry).is_none());
        assert_eq!(seq.current_portrait(&registry), None);
    }
}
