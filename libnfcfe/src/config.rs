// libnfcfe/src/config.rs

//! Runtime configuration for [`crate::driver::Driver`].

use crate::constants::{EXCHANGE_HARD_TIMEOUT_MS, FIELD_GUARD_TIME_MS};

/// Driver tuning knobs. Defaults suit a 13.56 MHz reader front end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Wait after `field_on()` before the field may be modulated
    pub field_guard_time_ms: u32,
    /// Exchange ceiling measured from the last sign of engine progress
    pub exchange_hard_timeout_ms: u32,
    /// Deactivate and re-enter low power when the driver is dropped while active
    pub deactivate_on_drop: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            field_guard_time_ms: FIELD_GUARD_TIME_MS,
            exchange_hard_timeout_ms: EXCHANGE_HARD_TIMEOUT_MS,
            deactivate_on_drop: true,
        }
    }
}

impl DriverConfig {
    pub fn with_exchange_timeout_ms(mut self, ms: u32) -> Self {
        self.exchange_hard_timeout_ms = ms;
        self
    }

    pub fn with_field_guard_time_ms(mut self, ms: u32) -> Self {
        self.field_guard_time_ms = ms;
        self
    }
}
