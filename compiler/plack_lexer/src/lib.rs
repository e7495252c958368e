//! Composable tokenizer pipeline for the Plack front end.
//!
//! Every stage implements the [`Tokenizer`] cursor contract with two tokens
//! of lookahead, so stages chain freely:
//!
//! - sources: [`DispatchTableTokenizer`] (characters to tokens via a
//!   [`DispatchTable`] of [`creator::TokenCreator`]s) and [`ListTokenizer`]
//! - filters: [`NullFilter`], [`RemovalFilter`], [`BufferedFilter`],
//!   [`PrintFilter`], [`RemoveInvalidCharacters`]
//! - [`PushbackTokenizer`] for putting tokens back
//! - [`Shell`] to chain filters behind one cursor, built by name through a
//!   [`StageRegistry`]
//!
//! Errors go to a shared [`ErrorHandler`](plack_diagnostic::ErrorHandler).
//! When it answers with [`Abort`](plack_diagnostic::Abort), cursor
//! operations return [`TokenizerError::Aborted`].

pub mod creator;
mod dispatch;
pub mod filter;
mod invalid;
mod list;
mod lookahead;
mod print;
mod pushback;
mod registry;
mod shell;
mod tokenizer;

#[cfg(test)]
mod test_support;

pub use dispatch::{DispatchTable, DispatchTableSource, DispatchTableTokenizer, SourceState};
pub use filter::{
    BufferedFilter, FilterTokenizer, NullFilter, RemovalFilter, TokenGenerator, TokenRemover,
};
pub use invalid::{InvalidCharacterMerger, RemoveInvalidCharacters};
pub use list::{ListSource, ListTokenizer};
pub use lookahead::{Lookahead, TokenSource};
pub use print::{PrintFilter, Printing};
pub use pushback::PushbackTokenizer;
pub use registry::{PipelineConfig, StageConfigError, StageContext, StageRegistry};
pub use shell::Shell;
pub use tokenizer::{tokenize, TokenListener, Tokenizer, TokenizerError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=plack_lexer=debug` for pipeline wiring or
/// `RUST_LOG=plack_lexer=trace` for every token.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
