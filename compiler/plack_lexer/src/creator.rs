//! Token creators: the per-character rules of a dispatch-table tokenizer.
//!
//! A creator is chosen by the first character of the next token. It
//! consumes at least one character from the cursor and returns what it
//! made, which may be nothing (whitespace, comments, reported garbage).
//! Creators are stateless and shared between tokenizers and threads.

use std::fmt;

use plack_diagnostic::{
    Abort, ErrorHandler, MessageFormatter, PhaseContext, PlackError,
};
use plack_ir::{SourceCodeRef, SourceLocation, SourcePosition, Token};
use plack_lexer_core::CharCursor;

mod comment;
mod identifier;
mod invalid;
mod number;
mod simple;

pub use comment::LineCommentCreator;
pub use identifier::IdentifierCreator;
pub use invalid::{InvalidCharacterCreator, InvalidCharacterTokenCreator};
pub use number::IntegerCreator;
pub use simple::{SingleCharCreator, WhitespaceCreator};

/// Creates tokens starting at the cursor.
pub trait TokenCreator: Send + Sync {
    /// Consume the characters of one token starting at `start`.
    ///
    /// Must consume at least one character. Errors go to `context`; the
    /// only failure is an abort raised by its handler.
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort>;
}

/// Result of one [`TokenCreator::create`] call.
pub struct CreatedTokens {
    pub first: Option<Token>,
    /// Further tokens, produced lazily after `first`. Read once.
    pub extra: Box<dyn Iterator<Item = Token>>,
    /// Where the token after these starts.
    pub next_start: SourcePosition,
    /// The consumed characters separate tokens (whitespace, comments).
    pub spacing: bool,
}

impl CreatedTokens {
    /// Characters consumed, no token made.
    pub fn nothing(next_start: SourcePosition) -> Self {
        CreatedTokens {
            first: None,
            extra: Box::new(std::iter::empty()),
            next_start,
            spacing: false,
        }
    }

    /// Whitespace or a comment consumed. The next token is flagged as
    /// preceded by space or a newline.
    pub fn spacing(next_start: SourcePosition) -> Self {
        CreatedTokens {
            spacing: true,
            ..CreatedTokens::nothing(next_start)
        }
    }

    pub fn single(token: Token, next_start: SourcePosition) -> Self {
        CreatedTokens {
            first: Some(token),
            extra: Box::new(std::iter::empty()),
            next_start,
            spacing: false,
        }
    }

    /// Follow `first` with `extra`.
    #[must_use]
    pub fn with_extra(mut self, extra: impl Iterator<Item = Token> + 'static) -> Self {
        self.extra = Box::new(extra);
        self
    }
}

impl fmt::Debug for CreatedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedTokens")
            .field("first", &self.first)
            .field("next_start", &self.next_start)
            .field("spacing", &self.spacing)
            .finish_non_exhaustive()
    }
}

/// What a creator may use besides the cursor.
pub struct CreatorContext<'a> {
    pub source_code: &'a SourceCodeRef,
    pub handler: &'a dyn ErrorHandler,
    pub messages: &'a dyn MessageFormatter,
}

impl CreatorContext<'_> {
    /// Report `error` at `location` of the source being tokenized.
    pub fn report(&self, error: PlackError, location: SourceLocation) -> Result<(), Abort> {
        let context = PhaseContext::tokenizing(Some(self.source_code.clone()))
            .at(location.start_position());
        self.handler.handle(
            error.at(self.source_code.clone(), location),
            Some(&context),
        )
    }

    /// Resolve a message through the context's formatter.
    pub fn message(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        self.messages.format_optional(key, args)
    }
}

/// Position of the next character of `cursor`.
#[inline]
pub fn cursor_position(cursor: &CharCursor) -> SourcePosition {
    SourcePosition::new(cursor.line(), cursor.offset())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
