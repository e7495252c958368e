//! Pushback: put tokens back in front of a stream.
//!
//! Pushed tokens need not have come from the wrapped tokenizer. A parser
//! uses this to split a token (`>>` into `>` `>`) or to retry after a
//! speculative read.

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token};
use tracing::trace;

use crate::{TokenListener, Tokenizer, TokenizerError};

/// Wraps an initialized tokenizer and lets tokens be pushed back onto it.
///
/// Pushing tokens one at a time returns them last-pushed-first.
/// [`push_all`](Self::push_all) keeps the order of the list.
pub struct PushbackTokenizer<T = Box<dyn Tokenizer>> {
    inner: T,
    /// Stack of pushed tokens; the last one is returned next.
    pushed: Vec<Token>,
    discarded: bool,
}

impl<T: Tokenizer> PushbackTokenizer<T> {
    pub fn new(inner: T) -> Self {
        PushbackTokenizer {
            inner,
            pushed: Vec::new(),
            discarded: false,
        }
    }

    /// Make `token` the next token returned.
    ///
    /// Ignored once the stream has been discarded.
    pub fn push(&mut self, token: Token) {
        if self.discarded {
            trace!(?token, "push after discard ignored");
            return;
        }
        self.pushed.push(token);
    }

    /// Make `tokens` the next tokens returned, in their own order.
    pub fn push_all<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: DoubleEndedIterator,
    {
        for token in tokens.into_iter().rev() {
            self.push(token);
        }
    }

    /// Number of pushed tokens not yet consumed.
    pub fn pushed_count(&self) -> usize {
        self.pushed.len()
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Tokenizer> Tokenizer for PushbackTokenizer<T> {
    fn has_next(&mut self) -> Result<bool, Abort> {
        if !self.pushed.is_empty() {
            return Ok(true);
        }
        self.inner.has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        match self.pushed.last() {
            Some(token) => Ok(token),
            None => self.inner.peek(),
        }
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        match self.pushed.pop() {
            Some(token) => Ok(token),
            None => self.inner.next(),
        }
    }

    fn has_token_after_next(&mut self) -> Result<bool, Abort> {
        match self.pushed.len() {
            0 => self.inner.has_token_after_next(),
            1 => self.inner.has_next(),
            _ => Ok(true),
        }
    }

    fn peek_token_after_next(&mut self) -> Result<&Token, TokenizerError> {
        match self.pushed.len() {
            0 => self.inner.peek_token_after_next(),
            1 => self.inner.peek(),
            len => Ok(&self.pushed[len - 2]),
        }
    }

    fn discard_remaining(&mut self) {
        self.discarded = true;
        self.pushed.clear();
        self.inner.discard_remaining();
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        self.inner.source_code()
    }

    fn add_listener(&mut self, listener: Box<dyn TokenListener>) {
        self.inner.add_listener(listener);
    }
}
