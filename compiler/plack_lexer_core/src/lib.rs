//! Standalone character layer for Plack tokenizers.
//!
//! - [`CharCursor`]: line/column tracking cursor over shared source text
//! - [`class`]: character classes used by the standard token creators
//!
//! This crate knows nothing about tokens, source handles or diagnostics.

pub mod class;
mod cursor;

pub use cursor::CharCursor;
