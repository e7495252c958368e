//! Shells: a chain of filter stages behind one cursor.
//!
//! Before `initialize` a shell holds its stages in pipeline order. Wiring
//! hands the upstream to the first stage and each stage to the next, after
//! which the shell owns only the last stage (which owns the rest).

use std::mem;

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token};
use tracing::debug;

use crate::{FilterTokenizer, NullFilter, TokenListener, Tokenizer, TokenizerError};

enum Chain {
    /// Stages waiting for their upstream.
    Pending(Vec<Box<dyn FilterTokenizer>>),
    /// The last stage.
    Wired(Box<dyn Tokenizer>),
}

/// Composite tokenizer chaining filter stages.
///
/// All cursor operations go to the last stage. `source_code` reports the
/// source of the tokenizer the first stage reads from.
pub struct Shell {
    chain: Chain,
    stage_count: usize,
    source_code: Option<SourceCodeRef>,
}

impl Shell {
    /// A shell over `stages`, first stage first. No stages means a single
    /// null filter.
    pub fn new(stages: Vec<Box<dyn FilterTokenizer>>) -> Self {
        let stages = if stages.is_empty() {
            vec![Box::new(NullFilter::pass_through()) as Box<dyn FilterTokenizer>]
        } else {
            stages
        };
        Shell {
            stage_count: stages.len(),
            chain: Chain::Pending(stages),
            source_code: None,
        }
    }

    /// A wired shell of one source stage feeding one filter.
    pub fn with_source(source: Box<dyn Tokenizer>, filter: Box<dyn FilterTokenizer>) -> Self {
        let mut shell = Shell::new(vec![filter]);
        shell.initialize(source);
        shell
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    fn last(&mut self) -> &mut dyn Tokenizer {
        match &mut self.chain {
            Chain::Wired(last) => &mut **last,
            Chain::Pending(_) => panic!("tokenizer shell used before `initialize`"),
        }
    }
}

impl FilterTokenizer for Shell {
    /// # Panics
    /// Panics if the shell was already initialized.
    #[tracing::instrument(level = "debug", skip_all)]
    fn initialize(&mut self, source: Box<dyn Tokenizer>) {
        let Chain::Pending(stages) = mem::replace(&mut self.chain, Chain::Pending(Vec::new()))
        else {
            panic!("tokenizer shell initialized twice");
        };
        self.source_code = source.source_code();
        let mut upstream = source;
        for mut stage in stages {
            stage.initialize(upstream);
            upstream = Box::new(stage);
        }
        debug!(stages = self.stage_count, "wired tokenizer shell");
        self.chain = Chain::Wired(upstream);
    }

    fn is_initialized(&self) -> bool {
        matches!(self.chain, Chain::Wired(_))
    }
}

impl Tokenizer for Shell {
    fn has_next(&mut self) -> Result<bool, Abort> {
        self.last().has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        self.last().peek()
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        self.last().next()
    }

    fn has_token_after_next(&mut self) -> Result<bool, Abort> {
        self.last().has_token_after_next()
    }

    fn peek_token_after_next(&mut self) -> Result<&Token, TokenizerError> {
        self.last().peek_token_after_next()
    }

    fn discard_remaining(&mut self) {
        if let Chain::Wired(last) = &mut self.chain {
            last.discard_remaining();
        }
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        self.source_code.clone()
    }

    fn add_listener(&mut self, listener: Box<dyn TokenListener>) {
        match &mut self.chain {
            Chain::Wired(last) => last.add_listener(listener),
            Chain::Pending(stages) => {
                if let Some(last) = stages.last_mut() {
                    last.add_listener(listener);
                }
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
