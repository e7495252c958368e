//! Error handlers.
//!
//! Every stage reports problems through one [`ErrorHandler::handle`] call at
//! the point of detection. The handler decides whether to count, suppress,
//! buffer, or render the error, and whether processing may continue.
//!
//! # Handling template
//!
//! [`handle`](ErrorHandler::handle) runs the same steps for every handler:
//!
//! 1. [`is_duplicate`](ErrorHandler::is_duplicate): skip the error entirely
//! 2. [`before_handling`](ErrorHandler::before_handling): count it
//! 3. [`handle_error`](ErrorHandler::handle_error): the handler's own policy
//! 4. [`after_handling`](ErrorHandler::after_handling): may produce [`Abort`]
//!
//! Handlers take `&self` so one handler can be shared as
//! `Arc<dyn ErrorHandler>` by every stage of a pipeline.

mod counting;
mod recording;
mod uniform;
mod writer;

pub use counting::CountingErrorHandler;
pub use recording::{ErrorRecord, RecordingErrorHandler};
pub use uniform::{SilentErrorHandler, UnusableErrorHandler};
pub use writer::{ColorMode, WriterConfig, WriterErrorHandler};

use tracing::trace;

use crate::{PhaseContext, PlackError, SeverityCounters};

/// Processing must stop: a fatal error has been fully reported.
///
/// Produced only by handlers, after the error that caused it was durably
/// reported. Stages propagate it with `?`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("aborting after fatal error: {reason}")]
pub struct Abort {
    reason: String,
}

impl Abort {
    /// Abort caused by `error`.
    pub fn after(error: &PlackError) -> Self {
        Abort {
            reason: error.to_string(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Receives every error reported during processing.
pub trait ErrorHandler: Send + Sync {
    /// Report `error`, raised in `context` if the raising stage gave one.
    ///
    /// Returns `Err(Abort)` when processing must stop.
    fn handle(&self, error: PlackError, context: Option<&PhaseContext>) -> Result<(), Abort> {
        if self.is_duplicate(&error) {
            trace!(key = ?error.key(), "suppressed duplicate error");
            return Ok(());
        }
        self.before_handling(&error);
        self.handle_error(&error, context);
        self.after_handling(&error)
    }

    /// Whether `error` repeats one already handled. Default: never.
    fn is_duplicate(&self, _error: &PlackError) -> bool {
        false
    }

    fn before_handling(&self, error: &PlackError) {
        self.counters().record(error.level());
    }

    /// The handler's own policy for a non-duplicate error.
    fn handle_error(&self, error: &PlackError, context: Option<&PhaseContext>);

    fn after_handling(&self, _error: &PlackError) -> Result<(), Abort> {
        Ok(())
    }

    /// Tallies of every error that got past duplicate suppression.
    fn counters(&self) -> &SeverityCounters;
}
