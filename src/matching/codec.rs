//! Textual record format for matches.
//!
//! A match renders as a single bracketed record:
//!
//! ```text
//! [<siglum>:Version <version>:Offset <offset>:Length <length>:<state>]
//! ```
//!
//! When the match has no short name the numeric version id stands in for it.
//! The parser reads the three numeric fields positionally (version, offset,
//! length) and skips whatever label text precedes each digit run. The
//! trailing state text is consumed but not read back, so a parsed match
//! always carries [`ChunkState::None`].

use std::str::FromStr;

use crate::error::{PalimpsestError, Result};
use crate::matching::entity::Match;
use crate::matching::state::ChunkState;
use crate::util::cursor::Cursor;

const OPEN: u8 = b'[';
const CLOSE: u8 = b']';
const FIELD_SEPARATOR: u8 = b':';

/// A value with a bracketed textual form.
pub trait BracketedRecord: Sized {
    /// Render everything up to, but excluding, the closing bracket.
    fn render_header(&self) -> String;

    /// Render the complete record.
    fn render(&self) -> String {
        let mut text = self.render_header();
        text.push(CLOSE as char);
        text
    }

    /// Parse one record starting at the first `[` at or after `start`.
    ///
    /// Returns the value and the number of bytes consumed, counted from
    /// `start` through the closing `]`. A record whose trailing text runs to
    /// the end of the buffer without a `]` is accepted and consumes the rest
    /// of the buffer.
    fn parse_record(buffer: &[u8], start: usize) -> Result<(Self, usize)>;
}

impl BracketedRecord for Match {
    fn render_header(&self) -> String {
        let name = if self.short_name.is_empty() {
            self.version.to_string()
        } else {
            self.short_name.clone()
        };
        format!(
            "[{name}:Version {}:Offset {}:Length {}:{}",
            self.version, self.offset, self.length, self.state
        )
    }

    fn parse_record(buffer: &[u8], start: usize) -> Result<(Self, usize)> {
        if start > buffer.len() {
            return Err(PalimpsestError::parse(format!(
                "start position {start} is past the end of a {}-byte buffer",
                buffer.len()
            )));
        }
        let mut cursor = Cursor::new(buffer, start);
        cursor.seek_past(OPEN)?;

        let name = cursor.take_until(FIELD_SEPARATOR)?;
        let short_name = std::str::from_utf8(name)
            .map_err(|e| PalimpsestError::parse(format!("short name is not valid UTF-8: {e}")))?
            .to_string();

        let version = parse_number::<u16>(cursor.labelled_digits(FIELD_SEPARATOR)?, "version")?;
        let offset = parse_number::<u32>(cursor.labelled_digits(FIELD_SEPARATOR)?, "offset")?;
        let length = parse_number::<u32>(cursor.labelled_digits(FIELD_SEPARATOR)?, "length")?;

        // The state text is not carried into the parsed match.
        cursor.take_until_or_end(CLOSE);

        let record = Match::with_state(version, offset, length, short_name, ChunkState::None);
        log::trace!("Parsed match record {record}");
        Ok((record, cursor.position() - start))
    }
}

impl Match {
    /// Parse one match record. See [`BracketedRecord::parse_record`].
    pub fn parse(buffer: &[u8], start: usize) -> Result<(Match, usize)> {
        Self::parse_record(buffer, start)
    }

    /// Parse every record in a buffer, in order.
    pub fn parse_all(buffer: &[u8]) -> Result<Vec<Match>> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while buffer[pos..].contains(&OPEN) {
            let (record, consumed) = Self::parse_record(buffer, pos)?;
            matches.push(record);
            pos += consumed;
        }
        Ok(matches)
    }
}

impl FromStr for Match {
    type Err = PalimpsestError;

    fn from_str(s: &str) -> Result<Self> {
        Match::parse(s.as_bytes(), 0).map(|(record, _)| record)
    }
}

fn parse_number<T: FromStr>(digits: &[u8], field: &str) -> Result<T> {
    let text = std::str::from_utf8(digits)
        .map_err(|e| PalimpsestError::parse(format!("{field} digits are not ASCII: {e}")))?;
    text.parse::<T>().map_err(|_| {
        PalimpsestError::value(format!(
            "{field} value {text} does not fit in {}",
            std::any::type_name::<T>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_canonical_form() {
        let m = Match::with_state(2, 15, 7, "B", ChunkState::Found);
        assert_eq!(m.render(), "[B:Version 2:Offset 15:Length 7:found]");
        assert_eq!(m.to_string(), m.render());
    }

    #[test]
    fn test_render_falls_back_to_version_id() {
        let m = Match::new(12, 0, 1, "");
        assert_eq!(m.render(), "[12:Version 12:Offset 0:Length 1:none]");
    }

    #[test]
    fn test_parse_canonical_record() {
        let text = b"[A:Version 1:Offset 8:Length 2:none]";
        let (m, consumed) = Match::parse(text, 0).unwrap();
        assert_eq!(m.version(), 1);
        assert_eq!(m.start_offset(), 8);
        assert_eq!(m.length(), 2);
        assert_eq!(m.short_name(), "A");
        assert_eq!(consumed, text.len());
    }

    #[test]
    fn test_consumed_counts_from_start_position() {
        let text = b"xyz  [A:Version 1:Offset 8:Length 2:none] tail";
        let (_, consumed) = Match::parse(text, 3).unwrap();
        assert_eq!(consumed, "  [A:Version 1:Offset 8:Length 2:none]".len());
    }

    #[test]
    fn test_parse_ignores_label_words() {
        let (m, _) = Match::parse(b"[A:v 3:at 40:len 5:whatever]", 0).unwrap();
        assert_eq!(m, Match::new(3, 40, 5, "A"));
    }

    #[test]
    fn test_parsed_state_is_always_none() {
        // The state text is written but never read back.
        let original = Match::with_state(4, 9, 3, "D", ChunkState::Transposed);
        let (parsed, _) = Match::parse(original.render().as_bytes(), 0).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.state(), ChunkState::None);
    }

    #[test]
    fn test_parse_missing_bracket() {
        let err = Match::parse(b"no-bracket-here", 0).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_non_digit_version() {
        let err = Match::parse(b"[abc:Version X:Offset 3:Length 2:none]", 0).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_missing_short_name_separator() {
        let err = Match::parse(b"[abc", 0).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_unterminated_last_record() {
        let text = b"[A:Version 1:Offset 2:Length 3:none";
        let (m, consumed) = Match::parse(text, 0).unwrap();
        assert_eq!(m, Match::new(1, 2, 3, "A"));
        assert_eq!(consumed, text.len());

        let (m, consumed) = Match::parse(b"[A:Version 1:Offset 2:Length 3:", 0).unwrap();
        assert_eq!(m.length(), 3);
        assert_eq!(consumed, 31);
    }

    #[test]
    fn test_parse_version_overflow() {
        let err = Match::parse(b"[A:Version 70000:Offset 0:Length 1:none]", 0).unwrap_err();
        assert!(matches!(err, PalimpsestError::Value(_)));
    }

    #[test]
    fn test_parse_start_past_end() {
        assert!(Match::parse(b"[A", 9).unwrap_err().is_parse());
    }

    #[test]
    fn test_parse_all() {
        let text = "[A:Version 1:Offset 0:Length 3:none]\n[B:Version 2:Offset 4:Length 3:found]\n";
        let matches = Match::parse_all(text.as_bytes()).unwrap();
        assert_eq!(
            matches,
            vec![Match::new(1, 0, 3, "A"), Match::new(2, 4, 3, "B")]
        );
        assert!(Match::parse_all(b"").unwrap().is_empty());
    }

    #[test]
    fn test_from_str() {
        let m: Match = "[A:Version 1:Offset 2:Length 3:none]".parse().unwrap();
        assert_eq!(m.key().offset, 2);
    }
}
