use plack_diagnostic::{Abort, ErrorSeverityLevel, PlackError};
use plack_ir::{SourceLocation, SourcePosition, Token, TokenId, TokenPayload};
use plack_lexer_core::{class, CharCursor};

use super::{cursor_position, CreatedTokens, CreatorContext, TokenCreator};

/// Reads decimal integer literals into an `Int` payload.
///
/// A literal too large for `i64` is reported and saturates, so the token
/// stream stays intact for the parser.
#[derive(Copy, Clone, Debug)]
pub struct IntegerCreator(pub TokenId);

impl TokenCreator for IntegerCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        let begin = cursor.byte_pos();
        cursor.bump();
        cursor.eat_while(class::is_decimal_digit);
        let end = cursor_position(cursor);
        let location = SourceLocation::new(start, end);
        let text = cursor.slice_from(begin);

        let value = if let Ok(value) = text.parse::<i64>() {
            value
        } else {
            let description = context.message("lexer.integer-overflow", &[&text]);
            context.report(
                PlackError::tokenizing(ErrorSeverityLevel::NonFatal, description),
                location,
            )?;
            i64::MAX
        };
        Ok(CreatedTokens::single(
            Token::with_payload(self.0, location, TokenPayload::Int(value)),
            end,
        ))
    }
}
