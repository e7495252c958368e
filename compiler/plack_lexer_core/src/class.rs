//! Character classes shared by the standard token creators.

/// Whitespace between tokens: space, tab, form feed, `\r` and `\n`.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// First character of an identifier: ASCII letter or `_`.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Later characters of an identifier: ASCII letter, digit or `_`.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
pub fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}
