//! Print filter: a transparent stage that writes every token it passes.
//!
//! Output failures never interrupt tokenizing. After the first failure of
//! the primary sink the filter switches to its fallback for good.

use std::io::{self, Write};

use plack_diagnostic::Abort;
use plack_ir::Token;
use tracing::warn;

use crate::filter::{filter_source_plumbing, impl_filter_source, Upstream};
use crate::{Lookahead, TokenSource};

/// Passes tokens through, writing one line per token.
pub struct Printing {
    upstream: Upstream,
    sink: Box<dyn Write>,
    fallback: Box<dyn Write>,
    sink_failed: bool,
}

impl Printing {
    fn print(&mut self, token: &Token) {
        if !self.sink_failed {
            match writeln!(self.sink, "{token:?}") {
                Ok(()) => return,
                Err(error) => {
                    warn!(%error, "token print sink failed, switching to fallback");
                    self.sink_failed = true;
                }
            }
        }
        let _ = writeln!(self.fallback, "{token:?}");
    }
}

impl TokenSource for Printing {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        let token = self.upstream.get().try_next()?;
        if let Some(token) = &token {
            self.print(token);
        }
        Ok(token)
    }

    filter_source_plumbing!();
}

impl_filter_source!(Printing);

pub type PrintFilter = Lookahead<Printing>;

impl Lookahead<Printing> {
    /// Print to `sink`, falling back to stderr.
    pub fn printing_to(sink: impl Write + 'static) -> Self {
        Self::printing_with_fallback(sink, io::stderr())
    }

    pub fn printing_with_fallback(sink: impl Write + 'static, fallback: impl Write + 'static) -> Self {
        Lookahead::new(Printing {
            upstream: Upstream::default(),
            sink: Box::new(sink),
            fallback: Box::new(fallback),
            sink_failed: false,
        })
    }

    /// Print to stdout, falling back to stderr.
    pub fn stdout() -> Self {
        Self::printing_to(io::stdout())
    }

    /// Whether the primary sink has failed.
    pub fn sink_failed(&self) -> bool {
        self.source().sink_failed
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
