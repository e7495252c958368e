//! Per-level error tallies.
//!
//! Handlers compose a [`SeverityCounters`] and call [`record`] once per
//! handled error. Counts only ever grow. The `*_and_above_count` accessors
//! sum a level with every level above it.
//!
//! [`record`]: SeverityCounters::record

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ErrorSeverityLevel;

/// Monotonic per-level counts, shareable across threads.
#[derive(Debug, Default)]
pub struct SeverityCounters {
    counts: [AtomicUsize; ErrorSeverityLevel::COUNT],
}

/// Generates the exact-level and cumulative accessors for each level.
macro_rules! level_accessors {
    ($($level:ident => $count:ident, $and_above:ident;)*) => {
        $(
            #[inline]
            pub fn $count(&self) -> usize {
                self.count(ErrorSeverityLevel::$level)
            }

            #[inline]
            pub fn $and_above(&self) -> usize {
                self.count_at_or_above(ErrorSeverityLevel::$level)
            }
        )*
    };
}

impl SeverityCounters {
    pub fn new() -> Self {
        SeverityCounters::default()
    }

    /// Count one error at `level`.
    #[inline]
    pub fn record(&self, level: ErrorSeverityLevel) {
        self.counts[level.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Errors recorded at exactly `level`.
    #[inline]
    pub fn count(&self, level: ErrorSeverityLevel) -> usize {
        self.counts[level.index()].load(Ordering::Relaxed)
    }

    /// Errors recorded at `level` or any higher level.
    pub fn count_at_or_above(&self, level: ErrorSeverityLevel) -> usize {
        self.counts[level.index()..]
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum()
    }

    /// Errors recorded at any level.
    pub fn total(&self) -> usize {
        self.count_at_or_above(ErrorSeverityLevel::Debug)
    }

    /// Exact-level counts, lowest level first.
    pub fn snapshot(&self) -> [usize; ErrorSeverityLevel::COUNT] {
        ErrorSeverityLevel::ALL.map(|level| self.count(level))
    }

    level_accessors! {
        Debug => debug_count, debug_and_above_count;
        Info => info_count, info_and_above_count;
        Notice => notice_count, notice_and_above_count;
        Warning => warning_count, warning_and_above_count;
        NonFatal => non_fatal_count, non_fatal_and_above_count;
        Fatal => fatal_count, fatal_and_above_count;
    }
}
