//! Phase context attached to reported errors.
//!
//! The stage that detects a problem describes itself with a small owned
//! snapshot rather than a reference to itself, so a recording handler can
//! keep the context alongside the error until it is replayed.

use std::fmt;

use plack_ir::{SourceCodeRef, SourcePosition};

/// Pipeline phase that raised an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Tokenizing,
    Parsing,
    Other(&'static str),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Tokenizing => f.write_str("tokenizing"),
            Phase::Parsing => f.write_str("parsing"),
            Phase::Other(name) => f.write_str(name),
        }
    }
}

/// Where in the pipeline an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseContext {
    pub phase: Phase,
    pub source_code: Option<SourceCodeRef>,
    /// Cursor position of the raising stage, if it has one.
    pub position: Option<SourcePosition>,
}

impl PhaseContext {
    pub fn new(phase: Phase) -> Self {
        PhaseContext {
            phase,
            source_code: None,
            position: None,
        }
    }

    /// Context of a tokenizer reading `source_code`.
    pub fn tokenizing(source_code: Option<SourceCodeRef>) -> Self {
        PhaseContext {
            phase: Phase::Tokenizing,
            source_code,
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for PhaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while {}", self.phase)?;
        if let Some(source) = &self.source_code {
            write!(f, " {}", source.full_name())?;
        }
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}
