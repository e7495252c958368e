//! Error severity levels.

use std::fmt;

/// Total order of error severities, from `Debug` (lowest) to `Fatal`.
///
/// Levels are zero-based and contiguous so they can index per-level arrays
/// (see [`SeverityCounters`](crate::SeverityCounters)).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum ErrorSeverityLevel {
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warning = 3,
    NonFatal = 4,
    Fatal = 5,
}

impl ErrorSeverityLevel {
    /// Number of levels.
    pub const COUNT: usize = 6;

    /// All levels, lowest first.
    pub const ALL: [ErrorSeverityLevel; Self::COUNT] = [
        ErrorSeverityLevel::Debug,
        ErrorSeverityLevel::Info,
        ErrorSeverityLevel::Notice,
        ErrorSeverityLevel::Warning,
        ErrorSeverityLevel::NonFatal,
        ErrorSeverityLevel::Fatal,
    ];

    /// Array index of this level.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Level for an index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn is_fatal(self) -> bool {
        self == ErrorSeverityLevel::Fatal
    }

    /// Levels that count as errors proper rather than remarks.
    #[inline]
    pub fn is_error(self) -> bool {
        self >= ErrorSeverityLevel::NonFatal
    }

    /// Key of the display name in the message catalog.
    pub const fn message_key(self) -> &'static str {
        match self {
            ErrorSeverityLevel::Debug => "level.debug",
            ErrorSeverityLevel::Info => "level.info",
            ErrorSeverityLevel::Notice => "level.notice",
            ErrorSeverityLevel::Warning => "level.warning",
            ErrorSeverityLevel::NonFatal => "level.non-fatal",
            ErrorSeverityLevel::Fatal => "level.fatal",
        }
    }
}

impl fmt::Display for ErrorSeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorSeverityLevel::Debug => "debug",
            ErrorSeverityLevel::Info => "info",
            ErrorSeverityLevel::Notice => "notice",
            ErrorSeverityLevel::Warning => "warning",
            ErrorSeverityLevel::NonFatal => "error",
            ErrorSeverityLevel::Fatal => "fatal error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests;
