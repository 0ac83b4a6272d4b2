// libnfcfe/src/constants.rs
//! Timing and sizing constants shared across the crate

/// Countdown tick period: one tick per millisecond
pub const TICK_PERIOD_US: u32 = 1000;

/// NFC Forum guard time after energizing the field before the first poll
pub const FIELD_GUARD_TIME_MS: u32 = 5;

/// Default budget for a whole discovery loop
pub const DEFAULT_TOTAL_DURATION_MS: u32 = 1000;

/// Exchange ceiling measured from the last sign of engine progress
pub const EXCHANGE_HARD_TIMEOUT_MS: u32 = 1000;

/// Upper bound on devices one discovery may report
pub const MAX_DEVICES: usize = 8;

/// Index the driver selects from the pending candidate set (first seen wins)
pub const SELECT_FIRST_CANDIDATE: usize = 0;
