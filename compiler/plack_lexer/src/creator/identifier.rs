use plack_diagnostic::Abort;
use plack_ir::{SourceLocation, SourcePosition, Token, TokenFlags, TokenId, TokenPayload};
use plack_lexer_core::{class, CharCursor};
use rustc_hash::FxHashMap;

use super::{cursor_position, CreatedTokens, CreatorContext, TokenCreator};

/// Reads identifiers, turning reserved words into their prototype tokens.
///
/// Plain identifiers get `id` and the identifier text as a string payload.
/// A reserved word is a clone of its prototype, moved to where it was found.
#[derive(Clone, Debug)]
pub struct IdentifierCreator {
    id: TokenId,
    reserved: FxHashMap<Box<str>, Token>,
}

impl IdentifierCreator {
    pub fn new(id: TokenId) -> Self {
        IdentifierCreator {
            id,
            reserved: FxHashMap::default(),
        }
    }

    /// Reserve `word` as a token with id `id`.
    #[must_use]
    pub fn reserve(self, word: &str, id: TokenId) -> Self {
        let prototype = Token::new(id, SourceLocation::default()).flagged(TokenFlags::RESERVED_WORD);
        self.with_prototype(word, prototype)
    }

    /// Reserve `word` as a copy of `prototype`, payload and flags included.
    #[must_use]
    pub fn with_prototype(mut self, word: &str, prototype: Token) -> Self {
        self.reserved.insert(word.into(), prototype);
        self
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains_key(word)
    }
}

impl TokenCreator for IdentifierCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        _context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        let begin = cursor.byte_pos();
        cursor.bump();
        cursor.eat_while(class::is_identifier_continue);
        let end = cursor_position(cursor);
        let location = SourceLocation::new(start, end);
        let text = cursor.slice_from(begin);

        let token = match self.reserved.get(text) {
            Some(prototype) => prototype.relocated(location),
            None => Token::with_payload(self.id, location, TokenPayload::string(text)),
        };
        Ok(CreatedTokens::single(token, end))
    }
}
