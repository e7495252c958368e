//! Source code handles.
//!
//! A [`SourceCode`] names a piece of input and knows how to read it. Reading
//! is lazy and cached: files are only touched when a tokenizer opens them or
//! a diagnostic needs a line excerpt. Line lookup goes through a
//! pre-computed line offset table, built once on first use.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Shared handle to a source; errors and tokenizers hold these.
pub type SourceCodeRef = Arc<SourceCode>;

/// Where the text of a [`SourceCode`] comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    /// Text supplied directly (tests, REPL input, generated code).
    Text(Arc<str>),
    /// A file read on first use.
    File(PathBuf),
}

/// Byte offset of each line start, for O(log L) line lookup.
#[derive(Clone, Debug, Default)]
struct LineOffsetTable {
    /// `offsets[0] = 0`; `offsets[n]` is the byte after the n-th `\n`.
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    fn build(text: &str) -> Self {
        let mut offsets = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        LineOffsetTable { offsets }
    }

    /// Byte range of a 1-based line, excluding its terminator.
    fn line_range(&self, text: &str, line: u32) -> Option<std::ops::Range<usize>> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        let start = *self.offsets.get(index)?;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(text.len(), |next| next - 1);
        // A trailing newline does not open another line.
        if start == text.len() && index > 0 {
            return None;
        }
        let end = if text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        Some(start..end)
    }

    fn line_count(&self, text: &str) -> usize {
        if text.ends_with('\n') {
            self.offsets.len() - 1
        } else {
            self.offsets.len()
        }
    }
}

/// A named piece of input text.
pub struct SourceCode {
    full_name: String,
    origin: SourceOrigin,
    text: OnceLock<Arc<str>>,
    lines: OnceLock<LineOffsetTable>,
}

impl SourceCode {
    /// Source backed by in-memory text.
    pub fn from_text(full_name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        SourceCode {
            full_name: full_name.into(),
            origin: SourceOrigin::Text(Arc::clone(&text)),
            text: OnceLock::from(text),
            lines: OnceLock::new(),
        }
    }

    /// Source backed by a file. Nothing is read until [`text`](Self::text).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        SourceCode {
            full_name: path.display().to_string(),
            origin: SourceOrigin::File(path),
            text: OnceLock::new(),
            lines: OnceLock::new(),
        }
    }

    /// Convenience for [`from_text`](Self::from_text) wrapped in an `Arc`.
    pub fn shared_text(full_name: impl Into<String>, text: impl Into<Arc<str>>) -> SourceCodeRef {
        Arc::new(Self::from_text(full_name, text))
    }

    /// The name diagnostics use for this source.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// Read (once) and return the full text.
    pub fn text(&self) -> io::Result<Arc<str>> {
        if let Some(text) = self.text.get() {
            return Ok(Arc::clone(text));
        }
        let read: Arc<str> = match &self.origin {
            SourceOrigin::Text(text) => Arc::clone(text),
            SourceOrigin::File(path) => std::fs::read_to_string(path)?.into(),
        };
        Ok(Arc::clone(self.text.get_or_init(|| read)))
    }

    /// Check whether the text can be obtained.
    pub fn is_readable(&self) -> bool {
        self.text().is_ok()
    }

    /// The 1-based `line` without its terminator.
    ///
    /// Returns `None` if the line is out of range or the source is unreadable.
    pub fn line(&self, line: u32) -> Option<String> {
        let text = self.text().ok()?;
        let table = self.lines.get_or_init(|| LineOffsetTable::build(&text));
        let range = table.line_range(&text, line)?;
        Some(text[range].to_owned())
    }

    /// Number of lines in the source, or `None` if it cannot be read.
    pub fn line_count(&self) -> Option<usize> {
        let text = self.text().ok()?;
        let table = self.lines.get_or_init(|| LineOffsetTable::build(&text));
        Some(table.line_count(&text))
    }
}

impl fmt::Debug for SourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCode")
            .field("full_name", &self.full_name)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

// Two handles describe the same source when they have the same name and origin.
impl PartialEq for SourceCode {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name && self.origin == other.origin
    }
}

impl Eq for SourceCode {}

impl std::hash::Hash for SourceCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
        self.origin.hash(state);
    }
}
