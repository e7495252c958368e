//! Error reporting for the Plack front end.
//!
//! - [`ErrorSeverityLevel`]: six totally ordered severities
//! - [`PlackError`] and [`ErrorKind`]: the error taxonomy
//! - [`ErrorKey`]: identity used for duplicate suppression
//! - [`SeverityCounters`]: per-level tallies shared by all handlers
//! - [`ErrorHandler`] and its implementations, and [`Abort`]
//! - [`MessageFormatter`] / [`Messages`]: display text for message keys
//!
//! # Aborting
//!
//! Stages never stop processing on their own. They hand every error to
//! their handler; when the handler returns [`Abort`] the stage propagates
//! it with `?`:
//!
//! ```text
//! handler.handle(error, Some(&context))?;
//! ```

mod context;
mod counters;
mod error;
pub mod handler;
mod key;
mod messages;
mod severity;

pub use context::{Phase, PhaseContext};
pub use counters::SeverityCounters;
pub use error::{ErrorKind, PlackError};
pub use handler::{
    Abort, ColorMode, CountingErrorHandler, ErrorHandler, ErrorRecord, RecordingErrorHandler,
    SilentErrorHandler, UnusableErrorHandler, WriterConfig, WriterErrorHandler,
};
pub use key::ErrorKey;
pub use messages::{MessageFormatter, Messages, MissingResource};
pub use severity::ErrorSeverityLevel;
