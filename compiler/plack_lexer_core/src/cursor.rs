//! Character cursor over source text.
//!
//! The cursor walks the text one `char` at a time and tracks the line and
//! column of the next character. Lines are terminated by `\n`; a `\r`
//! before it is an ordinary character. Columns count characters, not bytes.

use std::sync::Arc;

/// Forward-only cursor over shared source text.
///
/// Cloning is cheap (the text is shared) and gives an independent cursor,
/// which creators use to look ahead without consuming.
#[derive(Clone, Debug)]
pub struct CharCursor {
    text: Arc<str>,
    /// Byte index of the next character.
    pos: usize,
    /// 1-based line of the next character.
    line: u32,
    /// 0-based column of the next character, in characters.
    offset: u32,
}

impl CharCursor {
    /// Create a cursor at the start of `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        CharCursor {
            text: text.into(),
            pos: 0,
            line: 1,
            offset: 0,
        }
    }

    /// The whole text, including what has been consumed.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text not yet consumed.
    #[inline]
    pub fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    /// Byte index of the next character.
    #[inline]
    pub fn byte_pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after [`current`](Self::current).
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Check if the unconsumed text starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume and return the next character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.offset = 0;
        } else {
            self.offset += 1;
        }
        Some(ch)
    }

    /// Consume characters while `pred` holds. Returns how many were consumed.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }

    /// Consume up to, but not including, the next `\n` (or to the end).
    ///
    /// Returns how many characters were consumed.
    pub fn eat_until_newline(&mut self) -> usize {
        let rest = self.rest();
        let len = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
        let count = rest[..len].chars().count();
        self.pos += len;
        self.offset = self
            .offset
            .saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
        count
    }

    /// Text consumed since byte index `start`.
    ///
    /// `start` is a value previously returned by [`byte_pos`](Self::byte_pos).
    #[inline]
    pub fn slice_from(&self, start: usize) -> &str {
        &self.text[start..self.pos]
    }
}
