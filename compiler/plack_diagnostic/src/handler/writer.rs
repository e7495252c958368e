//! Writer Error Handler
//!
//! Renders each error as text on an [`io::Write`] sink, suppressing errors
//! whose key has been seen before, and aborts after any fatal error once it
//! has been written.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::warn;

use super::{Abort, ErrorHandler};
use crate::{
    ErrorKey, ErrorSeverityLevel, MessageFormatter, Messages, PhaseContext, PlackError,
    SeverityCounters,
};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const DEBUG: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Configuration for [`WriterErrorHandler`] output.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterConfig {
    /// Print the offending source line with a caret under the error column.
    pub show_source_excerpt: bool,
    /// Tab stops used when printing source lines.
    pub tab_width: usize,
    pub color: ColorMode,
    /// Whether the sink is a terminal (consulted for `ColorMode::Auto`).
    pub is_tty: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            show_source_excerpt: true,
            tab_width: 4,
            color: ColorMode::Auto,
            is_tty: false,
        }
    }
}

impl WriterConfig {
    /// Header lines only, no source excerpts, no colors.
    pub fn terse() -> Self {
        WriterConfig {
            show_source_excerpt: false,
            color: ColorMode::Never,
            ..WriterConfig::default()
        }
    }
}

struct Output<W> {
    writer: W,
    /// Receives the text when `writer` fails.
    fallback: Box<dyn Write + Send>,
}

impl<W: Write> Output<W> {
    fn emit(&mut self, text: &str) {
        let written = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(error) = written {
            warn!(%error, "error output failed, writing to fallback stream");
            let _ = self
                .fallback
                .write_all(text.as_bytes())
                .and_then(|()| self.fallback.flush());
        }
    }
}

/// Writes every distinct error to `W`.
///
/// Errors carrying an [`ErrorKey`] already seen by this handler are
/// suppressed before they are counted.
pub struct WriterErrorHandler<W> {
    output: Mutex<Output<W>>,
    seen_keys: Mutex<FxHashSet<ErrorKey>>,
    counters: SeverityCounters,
    messages: Arc<dyn MessageFormatter>,
    config: WriterConfig,
    colors: bool,
}

impl<W: Write + Send> WriterErrorHandler<W> {
    pub fn new(writer: W, config: WriterConfig) -> Self {
        WriterErrorHandler {
            output: Mutex::new(Output {
                writer,
                fallback: Box::new(io::stderr()),
            }),
            seen_keys: Mutex::new(FxHashSet::default()),
            counters: SeverityCounters::new(),
            messages: Arc::new(Messages::english()),
            colors: config.color.should_use_colors(config.is_tty),
            config,
        }
    }

    /// Resolve level names through `messages` instead of the English catalog.
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageFormatter>) -> Self {
        self.messages = messages;
        self
    }

    /// Write here when the primary writer fails. Defaults to stderr.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Write + Send + 'static) -> Self {
        self.output.get_mut().fallback = Box::new(fallback);
        self
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Number of distinct keys reported so far.
    pub fn seen_key_count(&self) -> usize {
        self.seen_keys.lock().len()
    }

    /// Run `f` against the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.output.lock().writer)
    }

    pub fn into_writer(self) -> W {
        self.output.into_inner().writer
    }

    /// Write a closing summary line, e.g.
    /// `error: aborting due to 2 previous errors; 1 warning emitted`.
    ///
    /// Writes nothing if no errors or warnings were reported.
    pub fn write_summary(&self) {
        let error_count = self.counters.non_fatal_and_above_count();
        let warning_count = self.counters.warning_count();
        let mut out = String::new();

        if error_count > 0 {
            self.push_colored(&mut out, "error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    out,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(out, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.push_colored(&mut out, "warning", colors::WARNING);
            let _ = writeln!(
                out,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        } else {
            return;
        }
        self.output.lock().emit(&out);
    }

    fn push_colored(&self, out: &mut String, text: &str, color: &str) {
        if self.colors {
            let _ = write!(out, "{color}{text}{}", colors::RESET);
        } else {
            out.push_str(text);
        }
    }

    /// Format one error, including its excerpt and context note.
    fn render(&self, error: &PlackError, context: Option<&PhaseContext>) -> String {
        let mut out = String::new();
        let level_color = level_color(error.level());
        let level_name = error.level_name(&*self.messages);
        let source = error
            .source_code()
            .or_else(|| context.and_then(|c| c.source_code.as_ref()));

        match (source, error.location()) {
            (Some(source), Some(location)) => {
                let position = location.start_position();
                if self.colors {
                    let _ = write!(
                        out,
                        "{}{}:{position}{}: ",
                        colors::BOLD,
                        source.full_name(),
                        colors::RESET
                    );
                } else {
                    let _ = write!(out, "{}:{position}: ", source.full_name());
                }
                self.push_colored(&mut out, &level_name, level_color);
                let _ = writeln!(out, ": {}", error.description());

                if self.config.show_source_excerpt {
                    if let Some(line) = source.line(position.line) {
                        let offset = usize::try_from(position.offset).unwrap_or(usize::MAX);
                        let (expanded, column) = expand_tabs(&line, offset, self.config.tab_width);
                        let _ = writeln!(out, "{expanded}");
                        out.push_str(&" ".repeat(column));
                        self.push_colored(&mut out, "^", level_color);
                        out.push('\n');
                    }
                }
            }
            _ => {
                self.push_colored(&mut out, &level_name, level_color);
                let _ = writeln!(out, ": {}", error.description());
            }
        }

        if let Some(context) = context {
            let _ = writeln!(out, "  = note: {context}");
        }
        out
    }
}

impl WriterErrorHandler<io::Stderr> {
    /// Handler writing to stderr, detecting whether stderr is a terminal.
    pub fn stderr(color: ColorMode) -> Self {
        let config = WriterConfig {
            color,
            is_tty: io::stderr().is_terminal(),
            ..WriterConfig::default()
        };
        WriterErrorHandler::new(io::stderr(), config)
    }
}

impl<W: Write + Send> ErrorHandler for WriterErrorHandler<W> {
    /// Claims the key on first sight, so of several reports racing on one
    /// key exactly one is counted and written.
    fn is_duplicate(&self, error: &PlackError) -> bool {
        error
            .key()
            .is_some_and(|key| !self.seen_keys.lock().insert(key.clone()))
    }

    fn handle_error(&self, error: &PlackError, context: Option<&PhaseContext>) {
        let text = self.render(error, context);
        self.output.lock().emit(&text);
    }

    fn after_handling(&self, error: &PlackError) -> Result<(), Abort> {
        if error.is_fatal() {
            return Err(Abort::after(error));
        }
        Ok(())
    }

    fn counters(&self) -> &SeverityCounters {
        &self.counters
    }
}

fn level_color(level: ErrorSeverityLevel) -> &'static str {
    match level {
        ErrorSeverityLevel::Fatal | ErrorSeverityLevel::NonFatal => colors::ERROR,
        ErrorSeverityLevel::Warning => colors::WARNING,
        ErrorSeverityLevel::Notice | ErrorSeverityLevel::Info => colors::NOTE,
        ErrorSeverityLevel::Debug => colors::DEBUG,
    }
}

/// Expand tabs in `line` to multiples of `tab_width`.
///
/// Returns the expanded line and the display column of the character at
/// `offset` (the end of the line if `offset` is past it).
fn expand_tabs(line: &str, offset: usize, tab_width: usize) -> (String, usize) {
    let tab_width = tab_width.max(1);
    let mut expanded = String::with_capacity(line.len());
    let mut width = 0;
    let mut caret_column = None;
    for (index, ch) in line.chars().enumerate() {
        if index == offset {
            caret_column = Some(width);
        }
        if ch == '\t' {
            let spaces = tab_width - width % tab_width;
            expanded.push_str(&" ".repeat(spaces));
            width += spaces;
        } else {
            expanded.push(ch);
            width += 1;
        }
    }
    (expanded, caret_column.unwrap_or(width))
}
