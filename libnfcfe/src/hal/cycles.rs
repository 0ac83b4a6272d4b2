// libnfcfe/src/hal/cycles.rs

/// Free-running cycle counter (e.g. DWT CYCCNT). Reads have no side effects
/// on real hardware; the value wraps at `u32::MAX`.
pub trait CycleCounter {
    fn cycles(&self) -> u32;

    fn frequency_hz(&self) -> u32;

    /// Cycles in `ms` milliseconds, clamped to half the counter range so
    /// wrapping comparisons stay valid.
    fn ms_to_cycles(&self, ms: u32) -> u32 {
        let cycles = ms as u64 * self.frequency_hz() as u64 / 1000;
        cycles.min((u32::MAX / 2) as u64) as u32
    }
}
