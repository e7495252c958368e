//! Handlers that treat every error kind the same way.

use super::ErrorHandler;
use crate::{PhaseContext, PlackError, SeverityCounters};

/// Counts errors and otherwise ignores them.
#[derive(Debug, Default)]
pub struct SilentErrorHandler {
    counters: SeverityCounters,
}

impl SilentErrorHandler {
    pub fn new() -> Self {
        SilentErrorHandler::default()
    }
}

impl ErrorHandler for SilentErrorHandler {
    fn handle_error(&self, _error: &PlackError, _context: Option<&PhaseContext>) {}

    fn counters(&self) -> &SeverityCounters {
        &self.counters
    }
}

/// Handler for contexts in which no error can occur.
///
/// Reaching it is a framework defect, so it panics.
#[derive(Debug, Default)]
pub struct UnusableErrorHandler {
    counters: SeverityCounters,
}

impl UnusableErrorHandler {
    pub fn new() -> Self {
        UnusableErrorHandler::default()
    }
}

impl ErrorHandler for UnusableErrorHandler {
    fn handle_error(&self, error: &PlackError, context: Option<&PhaseContext>) {
        match context {
            Some(context) => panic!("unusable error handler received `{error}` {context}"),
            None => panic!("unusable error handler received `{error}`"),
        }
    }

    fn counters(&self) -> &SeverityCounters {
        &self.counters
    }
}
