use tracing::debug;

use super::ErrorHandler;
use crate::{PhaseContext, PlackError, SeverityCounters};

/// Tallies errors by level and does nothing else.
#[derive(Debug, Default)]
pub struct CountingErrorHandler {
    counters: SeverityCounters,
}

impl CountingErrorHandler {
    pub fn new() -> Self {
        CountingErrorHandler::default()
    }
}

impl ErrorHandler for CountingErrorHandler {
    fn handle_error(&self, error: &PlackError, _context: Option<&PhaseContext>) {
        debug!(kind = error.kind().name(), level = %error.level(), "{}", error.description());
    }

    fn counters(&self) -> &SeverityCounters {
        &self.counters
    }
}
