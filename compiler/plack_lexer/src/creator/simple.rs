use plack_diagnostic::Abort;
use plack_ir::{SourceLocation, SourcePosition, Token, TokenId};
use plack_lexer_core::{class, CharCursor};

use super::{cursor_position, CreatedTokens, CreatorContext, TokenCreator};

/// Skips a run of whitespace.
#[derive(Copy, Clone, Debug, Default)]
pub struct WhitespaceCreator;

impl TokenCreator for WhitespaceCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        _start: SourcePosition,
        _context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        cursor.bump();
        cursor.eat_while(class::is_whitespace);
        Ok(CreatedTokens::spacing(cursor_position(cursor)))
    }
}

/// Makes a one-character token with a fixed id (punctuation, operators).
#[derive(Copy, Clone, Debug)]
pub struct SingleCharCreator(pub TokenId);

impl TokenCreator for SingleCharCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        _context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        cursor.bump();
        let end = cursor_position(cursor);
        Ok(CreatedTokens::single(
            Token::new(self.0, SourceLocation::new(start, end)),
            end,
        ))
    }
}
