//! Display text for message keys.
//!
//! Diagnostics never hard-code their user-facing text. They name a message
//! key plus arguments and a [`MessageFormatter`] turns that into display
//! text. [`Messages`] is the built-in English catalog; front ends override
//! individual entries or supply their own formatter.

use std::borrow::Cow;
use std::fmt::{self, Write};

use rustc_hash::FxHashMap;

/// A required message key had no entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("missing message resource `{key}`")]
pub struct MissingResource {
    pub key: String,
}

/// Maps a message key and arguments to display text.
pub trait MessageFormatter: Send + Sync {
    /// Resolve `key`, substituting `args`. `None` if the key is unknown.
    fn resolve(&self, key: &str, args: &[&dyn fmt::Display]) -> Option<String>;

    /// Resolve `key`, falling back to the key itself.
    fn format_optional(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        self.resolve(key, args).unwrap_or_else(|| key.to_owned())
    }

    /// Resolve `key`, failing if it is unknown.
    fn format_required(
        &self,
        key: &str,
        args: &[&dyn fmt::Display],
    ) -> Result<String, MissingResource> {
        self.resolve(key, args).ok_or_else(|| MissingResource {
            key: key.to_owned(),
        })
    }
}

/// Built-in entries: `(key, template)`. Templates use `{0}`, `{1}`, ...
const ENGLISH: &[(&str, &str)] = &[
    ("level.debug", "debug"),
    ("level.info", "info"),
    ("level.notice", "notice"),
    ("level.warning", "warning"),
    ("level.non-fatal", "error"),
    ("level.fatal", "fatal error"),
    ("source.unreadable", "cannot read {0}: {1}"),
    ("lexer.invalid-character", "invalid character {0}"),
    ("lexer.invalid-characters", "invalid characters {0}"),
    ("lexer.integer-overflow", "integer literal `{0}` is too large"),
    ("pipeline.unknown-stage", "unknown tokenizer stage `{0}`"),
];

/// Catalog-backed [`MessageFormatter`].
#[derive(Clone, Debug, Default)]
pub struct Messages {
    catalog: FxHashMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Messages {
    /// An empty catalog: every optional lookup falls back to its key.
    pub fn empty() -> Self {
        Messages::default()
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let catalog = ENGLISH
            .iter()
            .map(|&(key, template)| (Cow::Borrowed(key), Cow::Borrowed(template)))
            .collect();
        Messages { catalog }
    }

    /// Add or replace one entry.
    #[must_use]
    pub fn with_message(
        mut self,
        key: impl Into<Cow<'static, str>>,
        template: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.catalog.insert(key.into(), template.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.catalog.contains_key(key)
    }
}

impl MessageFormatter for Messages {
    fn resolve(&self, key: &str, args: &[&dyn fmt::Display]) -> Option<String> {
        self.catalog
            .get(key)
            .map(|template| substitute(template, args))
    }
}

/// Replace `{n}` placeholders with the matching argument.
///
/// Placeholders without a matching argument are left as written.
fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((close, args.get(index)?))
        });
        if let Some((close, arg)) = arg {
            let _ = write!(out, "{arg}");
            rest = &after[close + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
