// libnfcfe/src/driver/operations/discovery.rs

use std::time::Instant;

use log::{debug, trace, warn};

use crate::constants::{DEFAULT_TOTAL_DURATION_MS, MAX_DEVICES, SELECT_FIRST_CANDIDATE};
use crate::driver::Driver;
use crate::engine::{EngineState, RfEngine};
use crate::signal::WakeFlags;
use crate::types::{DiscoveredDeviceList, TechMask};
use crate::utils::deadline_after;
use crate::{Error, Result};

/// Parameters of one discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveryRequest {
    pub tech_mask: TechMask,
    pub device_limit: usize,
    pub total_duration_ms: u32,
    /// Deactivate and re-enter low power before returning. Callers that
    /// exchange right after discovery clear this.
    pub deactivate_after: bool,
}

impl DiscoveryRequest {
    pub fn new(tech_mask: TechMask) -> Self {
        Self {
            tech_mask,
            device_limit: 1,
            total_duration_ms: DEFAULT_TOTAL_DURATION_MS,
            deactivate_after: true,
        }
    }

    pub fn with_device_limit(mut self, limit: usize) -> Self {
        self.device_limit = limit;
        self
    }

    pub fn with_total_duration_ms(mut self, ms: u32) -> Self {
        self.total_duration_ms = ms;
        self
    }

    /// Leave the selected device activated for a following exchange.
    pub fn keep_active(mut self) -> Self {
        self.deactivate_after = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tech_mask.is_empty() {
            return Err(Error::InvalidParameter(
                "technology mask has no bits set".to_string(),
            ));
        }
        if self.device_limit == 0 {
            return Err(Error::InvalidParameter(
                "device limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl<E: RfEngine> Driver<E> {
    /// Poll, select and activate a device.
    ///
    /// Returns `Ok(true)` once a device is activated and `Ok(false)` when the
    /// total duration elapses first; either way `devices` holds what the
    /// engine reported, at most `device_limit` entries. Only the first
    /// pending candidate is ever selected.
    ///
    /// # Panics
    ///
    /// If the driver is uninitialized or a session is already active.
    pub fn discover(
        &mut self,
        request: &DiscoveryRequest,
        devices: &mut DiscoveredDeviceList<'_>,
    ) -> Result<bool> {
        request.validate()?;
        self.begin_call("discover");
        assert_eq!(
            self.engine.state(),
            EngineState::Idle,
            "discover called while a session is active"
        );
        devices.clear();
        let limit = request.device_limit.min(MAX_DEVICES).min(devices.capacity());
        if limit == 0 {
            return Err(Error::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }

        debug!(
            "discover: mask={:#04x} limit={} duration={}ms",
            request.tech_mask.bits(),
            limit,
            request.total_duration_ms
        );
        self.power.exit_sleep(&mut self.engine)?;
        if let Err(code) =
            self.engine
                .discover_start(request.tech_mask, limit, request.total_duration_ms)
        {
            self.abort_session();
            return Err(Error::rejected("discover_start", code));
        }

        let outcome = self.run_discovery(deadline_after(request.total_duration_ms));
        devices.fill_from(&self.engine, limit);

        match outcome {
            Ok(true) => {
                debug!("discover: activated, {} device(s) reported", devices.len());
                if request.deactivate_after {
                    self.close_session()?;
                }
                Ok(true)
            }
            Ok(false) => {
                warn!("discover: no device within {} ms", request.total_duration_ms);
                self.abort_session();
                Ok(false)
            }
            Err(e) => {
                warn!("discover: {}", e);
                self.abort_session();
                Err(e)
            }
        }
    }

    fn run_discovery(&mut self, deadline: Instant) -> Result<bool> {
        loop {
            // ENGINE_EVENT may be pending on every pass; the wait alone
            // never times out then.
            if Instant::now() >= deadline {
                return Ok(false);
            }
            self.engine.worker();
            let state = self.engine.state();
            trace!("discover: engine state {:?}", state);
            match state {
                EngineState::PollSelect => {
                    self.engine
                        .select_candidate(SELECT_FIRST_CANDIDATE)
                        .map_err(|code| Error::rejected("select_candidate", code))?;
                    continue;
                }
                s if s.is_activated() => return Ok(true),
                // The engine ran its own total duration down.
                EngineState::Idle => return Ok(false),
                _ => {}
            }

            let woke = self.signals.wait_any(
                WakeFlags::ENGINE_EVENT | WakeFlags::STOP_REQUESTED,
                Some(deadline),
            );
            if woke.contains(WakeFlags::STOP_REQUESTED) {
                return Err(Error::Cancelled);
            }
            if woke.is_empty() {
                return Ok(false);
            }
        }
    }
}
