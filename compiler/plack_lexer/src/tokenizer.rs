//! The tokenizer cursor contract.
//!
//! A [`Tokenizer`] is a pull-style cursor over a token stream with exactly
//! two tokens of lookahead. Sources, filters, pushback wrappers and shells
//! all implement it, so any of them can feed any other.

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token, TokenList};

/// Failure of a cursor operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerError {
    /// `peek`/`next` was called with no token left.
    #[error("no more tokens")]
    NoSuchToken,
    /// A handler stopped processing while the token was being produced.
    #[error(transparent)]
    Aborted(#[from] Abort),
}

/// Observer notified of every token a source produces.
pub trait TokenListener {
    fn token_produced(&mut self, token: &Token);
}

impl<F: FnMut(&Token)> TokenListener for F {
    fn token_produced(&mut self, token: &Token) {
        self(token);
    }
}

/// Pull-style token cursor with two tokens of lookahead.
///
/// Invariants every implementation keeps:
/// - `has_token_after_next()` implies `has_next()`
/// - a token returned by `next()` is never returned again
/// - after `discard_remaining()`, `has_next()` is `false` for good
pub trait Tokenizer {
    fn has_next(&mut self) -> Result<bool, Abort>;

    /// The next token, without consuming it.
    fn peek(&mut self) -> Result<&Token, TokenizerError>;

    fn next(&mut self) -> Result<Token, TokenizerError>;

    /// Check for a second token without consuming the first.
    fn has_token_after_next(&mut self) -> Result<bool, Abort>;

    fn peek_token_after_next(&mut self) -> Result<&Token, TokenizerError>;

    /// Stop the stream: drop buffered tokens and never produce another.
    ///
    /// Idempotent.
    fn discard_remaining(&mut self);

    /// The source the tokens come from, if known.
    fn source_code(&self) -> Option<SourceCodeRef>;

    /// Register `listener` for every token produced from now on.
    fn add_listener(&mut self, listener: Box<dyn TokenListener>);

    /// Consume the next token, failing if there is none.
    fn discard_next(&mut self) -> Result<(), TokenizerError> {
        self.next().map(drop)
    }

    /// The next token if there is one. Never fails with `NoSuchToken`.
    fn try_next(&mut self) -> Result<Option<Token>, Abort> {
        if !self.has_next()? {
            return Ok(None);
        }
        match self.next() {
            Ok(token) => Ok(Some(token)),
            Err(TokenizerError::NoSuchToken) => Ok(None),
            Err(TokenizerError::Aborted(abort)) => Err(abort),
        }
    }

    /// The next token if there is one, without consuming it.
    fn try_peek(&mut self) -> Result<Option<&Token>, Abort> {
        if !self.has_next()? {
            return Ok(None);
        }
        match self.peek() {
            Ok(token) => Ok(Some(token)),
            Err(TokenizerError::NoSuchToken) => Ok(None),
            Err(TokenizerError::Aborted(abort)) => Err(abort),
        }
    }

    /// Consume tokens up to, but excluding, the first one matching `pred`.
    ///
    /// Consumes everything if nothing matches.
    fn next_to(&mut self, pred: &mut dyn FnMut(&Token) -> bool) -> Result<TokenList, TokenizerError> {
        let mut tokens = TokenList::new();
        while self.has_next()? {
            if pred(self.peek()?) {
                break;
            }
            tokens.push(self.next()?);
        }
        Ok(tokens)
    }

    /// Like [`next_to`](Self::next_to), but also consumes the matching token.
    fn next_through(
        &mut self,
        pred: &mut dyn FnMut(&Token) -> bool,
    ) -> Result<TokenList, TokenizerError> {
        let mut tokens = TokenList::new();
        while self.has_next()? {
            let token = self.next()?;
            let done = pred(&token);
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    /// Consume every remaining token.
    fn remaining(&mut self) -> Result<TokenList, TokenizerError> {
        let mut tokens = TokenList::new();
        while let Some(token) = self.try_next()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn has_next(&mut self) -> Result<bool, Abort> {
        (**self).has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        (**self).peek()
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        (**self).next()
    }

    fn has_token_after_next(&mut self) -> Result<bool, Abort> {
        (**self).has_token_after_next()
    }

    fn peek_token_after_next(&mut self) -> Result<&Token, TokenizerError> {
        (**self).peek_token_after_next()
    }

    fn discard_remaining(&mut self) {
        (**self).discard_remaining();
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        (**self).source_code()
    }

    fn add_listener(&mut self, listener: Box<dyn TokenListener>) {
        (**self).add_listener(listener);
    }

    fn discard_next(&mut self) -> Result<(), TokenizerError> {
        (**self).discard_next()
    }
}

/// Consume every remaining token of `tokenizer`.
///
/// A stream cut short by a handler abort yields the abort.
pub fn tokenize(tokenizer: &mut dyn Tokenizer) -> Result<TokenList, Abort> {
    match tokenizer.remaining() {
        Ok(tokens) => Ok(tokens),
        Err(TokenizerError::Aborted(abort)) => Err(abort),
        // `remaining` only pulls after `has_next` said yes.
        Err(TokenizerError::NoSuchToken) => Ok(TokenList::new()),
    }
}
