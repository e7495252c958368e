use plack_diagnostic::{Abort, ErrorSeverityLevel, PlackError};
use plack_ir::{SourceLocation, SourcePosition, Token, TokenId, TokenPayload};
use plack_lexer_core::CharCursor;

use super::{cursor_position, CreatedTokens, CreatorContext, TokenCreator};

/// For characters invalid anywhere: reports one tokenizing error and drops
/// the character.
///
/// Errors are [`ErrorSeverityLevel::NonFatal`] unless configured otherwise.
#[derive(Copy, Clone, Debug)]
pub struct InvalidCharacterCreator {
    level: ErrorSeverityLevel,
}

impl InvalidCharacterCreator {
    pub fn with_level(level: ErrorSeverityLevel) -> Self {
        InvalidCharacterCreator { level }
    }

    pub fn level(&self) -> ErrorSeverityLevel {
        self.level
    }
}

impl Default for InvalidCharacterCreator {
    fn default() -> Self {
        InvalidCharacterCreator::with_level(ErrorSeverityLevel::NonFatal)
    }
}

impl TokenCreator for InvalidCharacterCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        if let Some(ch) = cursor.bump() {
            let shown = format!("{ch:?}");
            let description = context.message("lexer.invalid-character", &[&shown]);
            context.report(
                PlackError::tokenizing(self.level, description),
                SourceLocation::single(start),
            )?;
        }
        Ok(CreatedTokens::nothing(cursor_position(cursor)))
    }
}

/// Emits an [`TokenId::INVALID_CHARACTER`] token carrying the character,
/// leaving the report to a later stage that can merge runs of them.
#[derive(Copy, Clone, Debug, Default)]
pub struct InvalidCharacterTokenCreator;

impl TokenCreator for InvalidCharacterTokenCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        _context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        let Some(ch) = cursor.bump() else {
            return Ok(CreatedTokens::nothing(cursor_position(cursor)));
        };
        let token = Token::with_payload(
            TokenId::INVALID_CHARACTER,
            SourceLocation::single(start),
            TokenPayload::string(ch.to_string()),
        );
        Ok(CreatedTokens::single(token, cursor_position(cursor)))
    }
}
