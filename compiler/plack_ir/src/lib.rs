//! Plack IR - shared value types for the lexical front end.
//!
//! This crate contains the data every front-end stage passes around:
//! - Source positions and locations (line/column based)
//! - Source code handles with lazy reading and line lookup
//! - Tokens and `TokenList` for tokenizer output
//!
//! Everything here is value-like: cheap to clone, `Eq + Hash` where it makes
//! sense, and free of references back into the stages that produced it.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod source;
mod span;
mod token;

pub use source::{SourceCode, SourceCodeRef, SourceOrigin};
pub use span::{SourceLocation, SourcePosition};
pub use token::{Token, TokenError, TokenFlags, TokenId, TokenList, TokenPayload};
