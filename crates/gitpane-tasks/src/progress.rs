//! Growing-total progress estimation
//!
//! Recursive transfers discover work as they go, so the total is an
//! estimate that only grows. The percentage is computed against the
//! current estimate and scaled into the pre-completion cap; the final
//! 100% is reserved for the task's terminal event.

use gitpane_core::domain::task::PROGRESS_CAP;

/// Processed-over-estimated-total counter for one transfer task
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    processed: usize,
}

impl ProgressTracker {
    pub fn new(initial_total: usize) -> Self {
        Self {
            total: initial_total,
            processed: 0,
        }
    }

    /// Grows the estimate when directory expansion finds more items
    pub fn discovered(&mut self, count: usize) {
        self.total += count;
    }

    pub fn completed_one(&mut self) {
        self.processed += 1;
    }

    /// Percentage scaled into `0..=PROGRESS_CAP`
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = self.processed * PROGRESS_CAP as usize / self.total;
        scaled.min(PROGRESS_CAP as usize) as u8
    }
}
