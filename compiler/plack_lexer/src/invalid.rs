//! Removal of invalid-character tokens.
//!
//! Sources built with [`InvalidCharacterTokenCreator`](crate::creator::InvalidCharacterTokenCreator)
//! emit one token per bad character. This stage reports each run of
//! adjacent ones as a single error and drops them, so later stages never
//! see [`TokenId::INVALID_CHARACTER`].

use std::collections::VecDeque;
use std::sync::Arc;

use plack_diagnostic::{
    Abort, ErrorHandler, ErrorSeverityLevel, MessageFormatter, Messages, PhaseContext, PlackError,
};
use plack_ir::{SourceCodeRef, SourceLocation, Token, TokenId};
use tracing::trace;

use crate::filter::{Buffered, TokenGenerator};
use crate::{Lookahead, Tokenizer};

/// Generator merging runs of invalid characters into one report.
pub struct InvalidCharacterMerger {
    handler: Arc<dyn ErrorHandler>,
    messages: Arc<dyn MessageFormatter>,
}

impl InvalidCharacterMerger {
    pub fn new(handler: Arc<dyn ErrorHandler>, messages: Arc<dyn MessageFormatter>) -> Self {
        InvalidCharacterMerger { handler, messages }
    }

    fn report(
        &self,
        source_code: Option<SourceCodeRef>,
        characters: &str,
        location: SourceLocation,
    ) -> Result<(), Abort> {
        let mut chars = characters.chars();
        let description = match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                let shown = format!("{ch:?}");
                self.messages.format_optional("lexer.invalid-character", &[&shown])
            }
            _ => {
                let shown = format!("{characters:?}");
                self.messages.format_optional("lexer.invalid-characters", &[&shown])
            }
        };
        let error = PlackError::tokenizing(ErrorSeverityLevel::NonFatal, description);
        let error = match &source_code {
            Some(source) => error.at(source.clone(), location),
            None => error.located(location),
        };
        let context = PhaseContext::tokenizing(source_code).at(location.start_position());
        self.handler.handle(error, Some(&context))
    }
}

fn is_invalid(token: &Token) -> bool {
    token.is(TokenId::INVALID_CHARACTER)
}

impl TokenGenerator for InvalidCharacterMerger {
    fn generate(
        &mut self,
        upstream: &mut dyn Tokenizer,
        out: &mut VecDeque<Token>,
    ) -> Result<(), Abort> {
        while let Some(token) = upstream.try_next()? {
            if !is_invalid(&token) {
                out.push_back(token);
                return Ok(());
            }

            let mut characters = String::from(token.string_value().unwrap_or_default());
            let mut location = token.location();
            while upstream
                .try_peek()?
                .is_some_and(|next| is_invalid(next) && location.is_followed_by(next.location()))
            {
                if let Some(next) = upstream.try_next()? {
                    characters.push_str(next.string_value().unwrap_or_default());
                    location = location.to(next.location());
                }
            }
            trace!(?location, "merged invalid characters");
            self.report(upstream.source_code(), &characters, location)?;
        }
        Ok(())
    }
}

/// Filter stage reporting and dropping invalid-character tokens.
pub type RemoveInvalidCharacters = Lookahead<Buffered<InvalidCharacterMerger>>;

impl Lookahead<Buffered<InvalidCharacterMerger>> {
    pub fn reporting_to(handler: Arc<dyn ErrorHandler>) -> Self {
        Self::with_messages(handler, Arc::new(Messages::english()))
    }

    pub fn with_messages(handler: Arc<dyn ErrorHandler>, messages: Arc<dyn MessageFormatter>) -> Self {
        Lookahead::generating(InvalidCharacterMerger::new(handler, messages))
    }
}
