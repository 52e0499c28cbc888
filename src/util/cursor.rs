//! Bounds-checked cursor over a byte buffer.
//!
//! Record parsers thread a [`Cursor`] through small scanning helpers instead
//! of doing index arithmetic on the raw buffer. Every helper either advances
//! the cursor and returns what it scanned, or fails with a parse error and
//! leaves the position where the failure was detected.

use crate::error::{PalimpsestError, Result};

/// A read position within a byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at `pos`. Positions past the end are clamped.
    pub fn new(buffer: &'a [u8], pos: usize) -> Self {
        Cursor {
            buffer,
            pos: pos.min(buffer.len()),
        }
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check whether the cursor has reached the end of the buffer.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    /// The byte at the current position.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.pos).copied()
    }

    /// Advance past the next occurrence of `byte`, returning the index it was found at.
    pub fn seek_past(&mut self, byte: u8) -> Result<usize> {
        match self.buffer[self.pos..].iter().position(|b| *b == byte) {
            Some(offset) => {
                let found = self.pos + offset;
                self.pos = found + 1;
                Ok(found)
            }
            None => Err(PalimpsestError::parse(format!(
                "expected '{}' at or after byte {}",
                byte as char, self.pos
            ))),
        }
    }

    /// Consume the bytes up to `delimiter` and the delimiter itself.
    ///
    /// Returns the bytes before the delimiter.
    pub fn take_until(&mut self, delimiter: u8) -> Result<&'a [u8]> {
        let start = self.pos;
        let found = self.seek_past(delimiter)?;
        Ok(&self.buffer[start..found])
    }

    /// Like [`Cursor::take_until`], but a missing delimiter ends the scan at
    /// the end of the buffer instead of failing.
    pub fn take_until_or_end(&mut self, delimiter: u8) -> &'a [u8] {
        let start = self.pos;
        match self.seek_past(delimiter) {
            Ok(found) => &self.buffer[start..found],
            Err(_) => {
                self.pos = self.buffer.len();
                &self.buffer[start..]
            }
        }
    }

    /// Consume bytes while `predicate` holds, returning them.
    pub fn take_while<F: Fn(u8) -> bool>(&mut self, predicate: F) -> &'a [u8] {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if !predicate(byte) {
                break;
            }
            self.pos += 1;
        }
        &self.buffer[start..self.pos]
    }

    /// Consume exactly `byte` or fail.
    pub fn expect(&mut self, byte: u8) -> Result<()> {
        match self.peek() {
            Some(found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(PalimpsestError::parse(format!(
                "expected '{}' at byte {} but found '{}'",
                byte as char, self.pos, found as char
            ))),
            None => Err(PalimpsestError::parse(format!(
                "expected '{}' at byte {} but reached end of input",
                byte as char, self.pos
            ))),
        }
    }

    /// Scan a `label digits` field terminated by `terminator`.
    ///
    /// The label is any run of non-digit bytes other than the terminator and
    /// is skipped without validation. Returns the digit run.
    pub fn labelled_digits(&mut self, terminator: u8) -> Result<&'a [u8]> {
        self.take_while(|b| !b.is_ascii_digit() && b != terminator);
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(PalimpsestError::parse(format!(
                "expected digits at byte {}",
                self.pos
            )));
        }
        self.expect(terminator)?;
        Ok(digits)
    }
}
