//! Markup scanning for dialogue text
//!
//! Splits raw line text into reveal units: display tags are kept whole,
//! pause markers produce no text, and `...` collapses to two dots.

use super::types::{DialogueError, DialogueResult};

/// Default pause marker character
pub const PAUSE_MARKER: char = '|';
/// Default tag open delimiter
pub const TAG_OPEN: char = '<';
/// Default tag close delimiter
pub const TAG_CLOSE: char = '>';

/// One unit of line text, in reveal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit<'a> {
    /// Extended pause, nothing appended
    Pause,
    /// A whole tag run including both delimiters
    Tag(&'a str),
    /// Three dots (or `!..`/`?..`), appended as two dots
    Ellipsis,
    /// Any other character
    Plain(char),
}

impl Unit<'_> {
    /// Whether revealing this unit may trigger a voice blip
    pub fn is_voiced(&self) -> bool {
        matches!(self, Unit::Plain(c) if c.is_alphanumeric())
    }
}

/// A scanned unit and the byte length it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned<'a> {
    pub unit: Unit<'a>,
    pub len: usize,
}

/// Classifies units of raw dialogue text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupScanner {
    pause_marker: char,
    tag_open: char,
    tag_close: char,
}

impl Default for MarkupScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupScanner {
    /// Create a scanner with the default markers
    pub fn new() -> Self {
        Self {
            pause_marker: PAUSE_MARKER,
            tag_open: TAG_OPEN,
            tag_close: TAG_CLOSE,
        }
    }

    /// Create a scanner with custom markers
    ///
    /// All three markers must be distinct.
    pub fn with_delimiters(
        pause_marker: char,
        tag_open: char,
        tag_close: char,
    ) -> DialogueResult<Self> {
        if pause_marker == tag_open || pause_marker == tag_close {
            return Err(DialogueError::MarkerClash(pause_marker));
        }
        if tag_open == tag_close {
            return Err(DialogueError::MarkerClash(tag_open));
        }
        Ok(Self {
            pause_marker,
            tag_open,
            tag_close,
        })
    }

    /// Get the pause marker
    pub fn pause_marker(&self) -> char {
        self.pause_marker
    }

    /// Scan the unit starting at byte `offset`
    ///
    /// Returns `None` at end of text. `offset` must lie on a char boundary.
    pub fn scan<'a>(&self, text: &'a str, offset: usize) -> Option<Scanned<'a>> {
        let rest = text.get(offset..)?;
        let c = rest.chars().next()?;

        if c == self.pause_marker {
            return Some(Scanned {
                unit: Unit::Pause,
                len: c.len_utf8(),
            });
        }

        if c == self.tag_open {
            if let Some(len) = self.tag_run_len(rest) {
                return Some(Scanned {
                    unit: Unit::Tag(&rest[..len]),
                    len,
                });
            }
        }

        if matches!(c, '.' | '!' | '?') && rest[c.len_utf8()..].starts_with("..") {
            return Some(Scanned {
                unit: Unit::Ellipsis,
                len: c.len_utf8() + 2,
            });
        }

        Some(Scanned {
            unit: Unit::Plain(c),
            len: c.len_utf8(),
        })
    }

    /// Length of the tag run at the start of `rest`, if it closes on this line
    ///
    /// The first close delimiter ends the run; tags do not nest.
    fn tag_run_len(&self, rest: &str) -> Option<usize> {
        let body = &rest[self.tag_open.len_utf8()..];
        for (i, c) in body.char_indices() {
            if c == self.tag_close {
                return Some(self.tag_open.len_utf8() + i + c.len_utf8());
            }
            if c == '\n' {
                return None;
            }
        }
        None
    }

    /// Raw text with every pause marker removed, used when a reveal is skipped
    pub fn strip_pauses(&self, text: &str) -> String {
        text.chars().filter(|&c| c != self.pause_marker).collect()
    }

    /// Iterate over all units of `text`
    pub fn units<'s, 'a>(&'s self, text: &'a str) -> Units<'s, 'a> {
        Units {
            scanner: self,
            text,
            offset: 0,
        }
    }
}

/// Iterator over the units of a text
#[derive(Debug)]
pub struct Units<'s, 'a> {
    scanner: &'s MarkupScanner,
    text: &'a str,
    offset: usize,
}

impl<'a> Iterator for Units<'_, 'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let scanned = self.scanner.scan(self.text, self.offset)?;
        self.offset += scanned.len;
        Some(scanned.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<Unit<'_>> {
        MarkupScanner::new().units(text).collect()
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(units("Hi"), vec![Unit::Plain('H'), Unit::Plain('i')]);
    }

    #[test]
    fn test_pause_marker() {
        let scanner = MarkupScanner::new();
        let scanned = scanner.scan("a|b", 1).unwrap();
        assert_eq!(scanned.unit, Unit::Pause);
        assert_eq!(scanned.len, 1);
    }

    #[test]
    fn test_tag_run_is_atomic() {
        assert_eq!(
            units("<b>x</b>"),
            vec![Unit::Tag("<b>"), Unit::Plain('x'), Unit::Tag("</b>")]
        );
    }

    #[test]
    fn test_tag_with_attributes() {
        let scanned = MarkupScanner::new()
            .scan("<color=#ff0000>red", 0)
            .unwrap();
        assert_eq!(scanned.unit, Unit::Tag("<color=#ff0000>"));
        assert_eq!(scanned.len, 15);
    }

    #[test]
    fn test_unterminated_tag_falls_back_to_plain() {
        assert_eq!(
            units("a<b"),
            vec![Unit::Plain('a'), Unit::Plain('<'), Unit::Plain('b')]
        );
    }

    #[test]
    fn test_tag_does_not_cross_line_break() {
        let got = units("<a\nb>");
        assert_eq!(got[0], Unit::Plain('<'));
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn test_nested_tag_ends_at_first_close() {
        assert_eq!(
            units("<a<b>>"),
            vec![Unit::Tag("<a<b>"), Unit::Plain('>')]
        );
    }

    #[test]
    fn test_ellipsis_consumes_three() {
        let scanned = MarkupScanner::new().scan("...x", 0).unwrap();
        assert_eq!(scanned.unit, Unit::Ellipsis);
        assert_eq!(scanned.len, 3);
    }

    #[test]
    fn test_ellipsis_after_exclamation_and_question() {
        assert_eq!(units("!.."), vec![Unit::Ellipsis]);
        assert_eq!(units("?.."), vec![Unit::Ellipsis]);
    }

    #[test]
    fn test_two_dots_are_plain() {
        assert_eq!(units(".."), vec![Unit::Plain('.'), Unit::Plain('.')]);
    }

    #[test]
    fn test_four_dots() {
        assert_eq!(units("...."), vec![Unit::Ellipsis, Unit::Plain('.')]);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(
            units("é…ü"),
            vec![Unit::Plain('é'), Unit::Plain('…'), Unit::Plain('ü')]
        );
    }

    #[test]
    fn test_scan_at_end() {
        let scanner = MarkupScanner::new();
        assert!(scanner.scan("ab", 2).is_none());
        assert!(scanner.scan("", 0).is_none());
    }

    #[test]
    fn test_strip_pauses() {
        let scanner = MarkupScanner::new();
        assert_eq!(scanner.strip_pauses("Hi|<b>there</b>...|"), "Hi<b>there</b>...");
    }

    #[test]
    fn test_custom_delimiters() {
        let scanner = MarkupScanner::with_delimiters('^', '[', ']').unwrap();
        let got: Vec<_> = scanner.units("[i]a^|").collect();
        assert_eq!(
            got,
            vec![Unit::Tag("[i]"), Unit::Plain('a'), Unit::Pause, Unit::Plain('|')]
        );
    }

    #[test]
    fn test_clashing_delimiters_rejected() {
        assert_eq!(
            MarkupScanner::with_delimiters('<', '<', '>'),
            Err(DialogueError::MarkerClash('<'))
        );
        assert_eq!(
            MarkupScanner::with_delimiters('|', '[', '|'),
            Err(DialogueError::MarkerClash('|'))
        );
        assert_eq!(
            MarkupScanner::with_delimiters('|', '*', '*'),
            Err(DialogueError::MarkerClash('*'))
        );
    }

    #[test]
    fn test_is_voiced() {
        assert!(Unit::Plain('a').is_voiced());
        assert!(Unit::Plain('7').is_voiced());
        assert!(!Unit::Plain(' ').is_voiced());
        assert!(!Unit::Plain(',').is_voiced());
        assert!(!Unit::Tag("<b>").is_voiced());
        assert!(!Unit::Ellipsis.is_voiced());
        assert!(!Unit::Pause.is_voiced());
    }
}
