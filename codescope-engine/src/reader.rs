//! Character reader
//!
//! Walks source text character by character while tracking the current
//! line / column / byte offset. Matchers measure against the reader without
//! advancing it; the lexer commits matches by advancing.
//!
//! Line terminators: `\r\n` counts as a single terminator (the line advances
//! once, when the `\n` is consumed), and a bare `\r` also advances the line.

use crate::location::Position;

/// A checkpoint of the reader's state, cheap to take and restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    line: usize,
    column: usize,
}

/// Cursor over source text with position tracking.
#[derive(Debug, Clone)]
pub struct CharReader<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> CharReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// The full source this reader walks.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// Byte offset of the current position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Look `ahead` characters past the current position without consuming.
    pub fn peek(&self, ahead: usize) -> Option<char> {
        self.rest().chars().nth(ahead)
    }

    /// The character immediately before the current position, if any.
    pub fn previous_char(&self) -> Option<char> {
        self.source[..self.offset].chars().next_back()
    }

    /// Check whether the source at the current position starts with `literal`.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consume one character, updating line and column.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.offset += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            // The terminator completes at the following `\n`.
            '\r' if self.rest().starts_with('\n') => {
                self.column += 1;
            }
            '\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => {
                self.column += 1;
            }
        }
        Some(ch)
    }

    /// Consume `count` characters and return the consumed slice.
    ///
    /// Stops early at end of input.
    pub fn advance_by(&mut self, count: usize) -> &'a str {
        let start = self.offset;
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
        &self.source[start..self.offset]
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }
}
