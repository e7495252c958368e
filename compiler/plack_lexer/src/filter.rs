//! Filter stages.
//!
//! A filter wraps exactly one upstream tokenizer, handed to it by
//! [`FilterTokenizer::initialize`], and re-exposes the cursor contract over
//! a transformed stream. Every filter here is a [`Lookahead`] over a
//! [`FilterSource`], so lookahead behaves the same at every stage.
//!
//! Using a filter before `initialize` is a programming error and panics.

use std::collections::VecDeque;

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token};
use tracing::trace;

use crate::{Lookahead, TokenSource, Tokenizer};

/// A tokenizer stage fed by another tokenizer.
pub trait FilterTokenizer: Tokenizer {
    /// Connect the upstream tokenizer.
    fn initialize(&mut self, source: Box<dyn Tokenizer>);

    fn is_initialized(&self) -> bool;
}

/// Slot holding a filter's upstream tokenizer.
#[derive(Default)]
pub struct Upstream {
    tokenizer: Option<Box<dyn Tokenizer>>,
}

impl Upstream {
    pub fn set(&mut self, tokenizer: Box<dyn Tokenizer>) {
        self.tokenizer = Some(tokenizer);
    }

    pub fn is_set(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// The upstream tokenizer.
    ///
    /// # Panics
    /// Panics if the filter was never initialized.
    pub fn get(&mut self) -> &mut dyn Tokenizer {
        match &mut self.tokenizer {
            Some(tokenizer) => &mut **tokenizer,
            None => panic!("filter tokenizer used before `initialize`"),
        }
    }

    pub fn source_code(&self) -> Option<SourceCodeRef> {
        self.tokenizer.as_ref().and_then(|t| t.source_code())
    }

    pub fn discard_remaining(&mut self) {
        if let Some(tokenizer) = &mut self.tokenizer {
            tokenizer.discard_remaining();
        }
    }
}

/// A [`TokenSource`] that reads from an [`Upstream`].
pub trait FilterSource: TokenSource {
    fn upstream(&self) -> &Upstream;

    fn upstream_mut(&mut self) -> &mut Upstream;
}

impl<S: FilterSource> FilterTokenizer for Lookahead<S> {
    fn initialize(&mut self, source: Box<dyn Tokenizer>) {
        self.source_mut().upstream_mut().set(source);
    }

    fn is_initialized(&self) -> bool {
        self.source().upstream().is_set()
    }
}

/// Implements the `TokenSource` plumbing every filter source shares.
macro_rules! filter_source_plumbing {
    () => {
        fn source_code(&self) -> Option<plack_ir::SourceCodeRef> {
            self.upstream.source_code()
        }

        fn discard_remaining(&mut self) {
            self.upstream.discard_remaining();
        }
    };
}

macro_rules! impl_filter_source {
    ($ty:ty $(, $($bound:tt)+)?) => {
        impl$(<$($bound)+>)? $crate::filter::FilterSource for $ty {
            fn upstream(&self) -> &$crate::filter::Upstream {
                &self.upstream
            }

            fn upstream_mut(&mut self) -> &mut $crate::filter::Upstream {
                &mut self.upstream
            }
        }
    };
}

pub(crate) use filter_source_plumbing;
pub(crate) use impl_filter_source;

// Null

/// Passes every upstream token through unchanged.
#[derive(Default)]
pub struct PassThrough {
    upstream: Upstream,
}

impl TokenSource for PassThrough {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        self.upstream.get().try_next()
    }

    filter_source_plumbing!();
}

impl_filter_source!(PassThrough);

/// Identity stage.
pub type NullFilter = Lookahead<PassThrough>;

impl Lookahead<PassThrough> {
    pub fn pass_through() -> Self {
        Lookahead::new(PassThrough::default())
    }
}

// Removal

/// Decides which tokens a [`RemovalFilter`] drops.
pub trait TokenRemover {
    fn remove(&mut self, token: &Token) -> bool;
}

impl<F: FnMut(&Token) -> bool> TokenRemover for F {
    fn remove(&mut self, token: &Token) -> bool {
        self(token)
    }
}

/// Drops every upstream token the remover selects, keeping order.
pub struct Removal<R> {
    upstream: Upstream,
    remover: R,
}

impl<R: TokenRemover> TokenSource for Removal<R> {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        while let Some(token) = self.upstream.get().try_next()? {
            if !self.remover.remove(&token) {
                return Ok(Some(token));
            }
            trace!(?token, "removed token");
        }
        Ok(None)
    }

    filter_source_plumbing!();
}

impl_filter_source!(Removal<R>, R: TokenRemover);

pub type RemovalFilter<R> = Lookahead<Removal<R>>;

impl<R: TokenRemover> Lookahead<Removal<R>> {
    pub fn removing(remover: R) -> Self {
        Lookahead::new(Removal {
            upstream: Upstream::default(),
            remover,
        })
    }
}

// Buffered

/// Turns upstream tokens into zero or more output tokens per step.
pub trait TokenGenerator {
    /// Read from `upstream` and append tokens to `out`.
    ///
    /// Called only while `upstream` has tokens left. Each call must append
    /// at least one token, unless it drained `upstream`.
    fn generate(
        &mut self,
        upstream: &mut dyn Tokenizer,
        out: &mut VecDeque<Token>,
    ) -> Result<(), Abort>;
}

/// Queues the output of a [`TokenGenerator`].
pub struct Buffered<G> {
    upstream: Upstream,
    generator: G,
    queue: VecDeque<Token>,
}

impl<G: TokenGenerator> TokenSource for Buffered<G> {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Ok(Some(token));
            }
            let upstream = self.upstream.get();
            if !upstream.has_next()? {
                return Ok(None);
            }
            self.generator.generate(upstream, &mut self.queue)?;
            if self.queue.is_empty() {
                assert!(
                    !upstream.has_next()?,
                    "token generator produced nothing while upstream has tokens left"
                );
                return Ok(None);
            }
        }
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        self.upstream.source_code()
    }

    fn discard_remaining(&mut self) {
        self.queue.clear();
        self.upstream.discard_remaining();
    }
}

impl_filter_source!(Buffered<G>, G: TokenGenerator);

pub type BufferedFilter<G> = Lookahead<Buffered<G>>;

impl<G: TokenGenerator> Lookahead<Buffered<G>> {
    pub fn generating(generator: G) -> Self {
        Lookahead::new(Buffered {
            upstream: Upstream::default(),
            generator,
            queue: VecDeque::new(),
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
