//! Two-token lookahead over a primitive token source.
//!
//! [`TokenSource`] is what concrete tokenizers and filters implement: a
//! single "give me the next token, if any" operation. [`Lookahead`] turns
//! any source into a full [`Tokenizer`] by caching at most two tokens and
//! broadcasting each produced token to the registered listeners.

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token};
use tracing::trace;

use crate::{TokenListener, Tokenizer, TokenizerError};

/// Primitive producer behind a [`Lookahead`].
pub trait TokenSource {
    /// Produce the next token; `None` once the source is exhausted.
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort>;

    fn source_code(&self) -> Option<SourceCodeRef>;

    /// The consumer has stopped reading. Default: nothing to release.
    fn discard_remaining(&mut self) {}
}

/// The cursor core: two cached tokens in front of a [`TokenSource`].
///
/// Invariant: `token_after_next.is_some()` implies `next_token.is_some()`.
pub struct Lookahead<S> {
    source: S,
    next_token: Option<Token>,
    token_after_next: Option<Token>,
    discarded: bool,
    listeners: Vec<Box<dyn TokenListener>>,
}

impl<S: TokenSource> Lookahead<S> {
    pub fn new(source: S) -> Self {
        Lookahead {
            source,
            next_token: None,
            token_after_next: None,
            discarded: false,
            listeners: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Whether `discard_remaining` has been called.
    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Pull one token from the source and tell the listeners about it.
    fn pull(&mut self) -> Result<Option<Token>, Abort> {
        if self.discarded {
            return Ok(None);
        }
        let token = self.source.get_next_token()?;
        if let Some(token) = &token {
            trace!(?token, "produced token");
            for listener in &mut self.listeners {
                listener.token_produced(token);
            }
        }
        Ok(token)
    }
}

impl<S: TokenSource> Tokenizer for Lookahead<S> {
    fn has_next(&mut self) -> Result<bool, Abort> {
        if self.next_token.is_none() {
            self.next_token = self.pull()?;
        }
        Ok(self.next_token.is_some())
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        self.has_next()?;
        self.next_token.as_ref().ok_or(TokenizerError::NoSuchToken)
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        self.has_next()?;
        let token = self.next_token.take().ok_or(TokenizerError::NoSuchToken)?;
        self.next_token = self.token_after_next.take();
        Ok(token)
    }

    fn has_token_after_next(&mut self) -> Result<bool, Abort> {
        if !self.has_next()? {
            return Ok(false);
        }
        if self.token_after_next.is_none() {
            self.token_after_next = self.pull()?;
        }
        Ok(self.token_after_next.is_some())
    }

    fn peek_token_after_next(&mut self) -> Result<&Token, TokenizerError> {
        self.has_token_after_next()?;
        self.token_after_next
            .as_ref()
            .ok_or(TokenizerError::NoSuchToken)
    }

    fn discard_remaining(&mut self) {
        if self.discarded {
            return;
        }
        trace!("discarding remaining tokens");
        self.discarded = true;
        self.next_token = None;
        self.token_after_next = None;
        self.source.discard_remaining();
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        self.source.source_code()
    }

    fn add_listener(&mut self, listener: Box<dyn TokenListener>) {
        self.listeners.push(listener);
    }
}
