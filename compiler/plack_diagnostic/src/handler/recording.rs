//! Buffer errors now, replay them into another handler later.
//!
//! Used around speculative work: errors raised while trying one
//! alternative are recorded, then either discarded or transferred to the
//! permanent handler once the alternative is chosen.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{Abort, ErrorHandler};
use crate::{PhaseContext, PlackError, SeverityCounters};

/// One buffered error and the context it was raised in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub error: PlackError,
    pub context: Option<PhaseContext>,
}

/// Keeps every error, in arrival order, until transferred or cleared.
#[derive(Debug, Default)]
pub struct RecordingErrorHandler {
    records: Mutex<VecDeque<ErrorRecord>>,
    counters: SeverityCounters,
}

impl RecordingErrorHandler {
    pub fn new() -> Self {
        RecordingErrorHandler::default()
    }

    /// Number of records currently buffered.
    pub fn record_count(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of the buffered records, oldest first.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Drop every buffered record.
    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Replay buffered records into `target` in arrival order.
    ///
    /// Each record is removed before it is handed over, so records added
    /// concurrently may be interleaved with the transfer. If `target`
    /// aborts, the records not yet transferred are dropped: the buffer is
    /// always empty when this returns.
    pub fn transfer_errors_to(&self, target: &dyn ErrorHandler) -> Result<(), Abort> {
        if self.is_same_handler(target) {
            return Ok(());
        }
        let mut transferred = 0_usize;
        loop {
            let next = self.records.lock().pop_front();
            let Some(record) = next else { break };
            if let Err(abort) = target.handle(record.error, record.context.as_ref()) {
                let dropped = self.take_all();
                debug!(transferred, dropped, "error transfer aborted");
                return Err(abort);
            }
            transferred += 1;
        }
        debug!(transferred, "transferred recorded errors");
        Ok(())
    }

    /// Like [`transfer_errors_to`](Self::transfer_errors_to), but holds the
    /// buffer lock for the whole drain: no other thread can add or drain
    /// records until it finishes.
    ///
    /// `target` must not report back into this recorder.
    pub fn transfer_errors_atomically(&self, target: &dyn ErrorHandler) -> Result<(), Abort> {
        if self.is_same_handler(target) {
            return Ok(());
        }
        let mut records = self.records.lock();
        let mut transferred = 0_usize;
        while let Some(record) = records.pop_front() {
            if let Err(abort) = target.handle(record.error, record.context.as_ref()) {
                let dropped = records.len();
                records.clear();
                debug!(transferred, dropped, "atomic error transfer aborted");
                return Err(abort);
            }
            transferred += 1;
        }
        debug!(transferred, "atomically transferred recorded errors");
        Ok(())
    }

    fn take_all(&self) -> usize {
        let mut records = self.records.lock();
        let count = records.len();
        records.clear();
        count
    }

    // Replaying into itself would loop forever or deadlock.
    fn is_same_handler(&self, target: &dyn ErrorHandler) -> bool {
        let same = std::ptr::addr_eq(std::ptr::from_ref(self), std::ptr::from_ref(target));
        if same {
            warn!("ignoring transfer of recorded errors into their own recorder");
        }
        same
    }
}

impl ErrorHandler for RecordingErrorHandler {
    fn handle_error(&self, error: &PlackError, context: Option<&PhaseContext>) {
        self.records.lock().push_back(ErrorRecord {
            error: error.clone(),
            context: context.cloned(),
        });
    }

    fn counters(&self) -> &SeverityCounters {
        &self.counters
    }
}
