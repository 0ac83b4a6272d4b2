//! Deadline helpers for the two timeout strategies the driver uses: coarse
//! wall-clock deadlines for blocking waits, and cycle-counter deadlines for
//! busy-poll loops.

use std::time::{Duration, Instant};

use crate::hal::CycleCounter;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Wall-clock deadline `timeout_ms` from now.
pub fn deadline_after(timeout_ms: u32) -> Instant {
    Instant::now() + ms(timeout_ms as u64)
}

/// Budget measured on a wrapping cycle counter from a movable start mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDeadline {
    mark: u32,
    budget: u32,
}

impl CycleDeadline {
    pub fn start(counter: &dyn CycleCounter, timeout_ms: u32) -> Self {
        Self {
            mark: counter.cycles(),
            budget: counter.ms_to_cycles(timeout_ms),
        }
    }

    /// Restart the budget from the current counter value.
    pub fn reset(&mut self, counter: &dyn CycleCounter) {
        self.mark = counter.cycles();
    }

    pub fn elapsed(&self, counter: &dyn CycleCounter) -> u32 {
        counter.cycles().wrapping_sub(self.mark)
    }

    pub fn expired(&self, counter: &dyn CycleCounter) -> bool {
        self.elapsed(counter) > self.budget
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }
}
