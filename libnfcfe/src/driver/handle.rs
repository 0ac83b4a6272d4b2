// libnfcfe/src/driver/handle.rs

use log::{debug, warn};

use crate::config::DriverConfig;
use crate::countdown::CountdownTimer;
use crate::engine::RfEngine;
use crate::hal::CycleCounter;
use crate::power::{PowerModeController, PowerState};
use crate::signal::{InterruptSignalBridge, WakeFlags};
use crate::{Error, Result};

/// Front-end driver. Owned and driven by one application worker thread;
/// the engine's event hook and the tick timer only post wake flags.
pub struct Driver<E: RfEngine> {
    pub(crate) engine: E,
    pub(crate) power: PowerModeController,
    pub(crate) countdown: CountdownTimer,
    pub(crate) signals: InterruptSignalBridge,
    pub(crate) cycles: Box<dyn CycleCounter>,
    pub(crate) config: DriverConfig,
}

impl<E: RfEngine> Driver<E> {
    pub(crate) fn from_parts(
        engine: E,
        countdown: CountdownTimer,
        signals: InterruptSignalBridge,
        cycles: Box<dyn CycleCounter>,
        config: DriverConfig,
    ) -> Self {
        Self {
            engine,
            power: PowerModeController::new(),
            countdown,
            signals,
            cycles,
            config,
        }
    }

    /// Bring the front end up and park it in low power. The calling thread
    /// becomes the driver's worker thread. On failure the driver stays
    /// `Uninitialized` and `initialize` may be retried.
    pub fn initialize(&mut self) -> Result<()> {
        self.power
            .initialize(&mut self.engine, &mut self.countdown, &self.signals)
    }

    /// Energize the field and wait out the guard time.
    pub fn field_on(&mut self) -> Result<()> {
        self.power.field_on(&mut self.engine)?;
        self.wait_ms(self.config.field_guard_time_ms);
        Ok(())
    }

    /// De-energize the field and re-enter low power. Idempotent.
    pub fn field_off(&mut self) -> Result<()> {
        self.power.field_off(&mut self.engine)
    }

    /// Deactivate the engine and re-enter low power. Used after a discovery
    /// that kept the device active when no exchange follows.
    pub fn deactivate(&mut self) -> Result<()> {
        self.require_initialized("deactivate");
        self.close_session()
    }

    /// Block on the countdown timer for `ms` milliseconds. A stop request
    /// arriving meanwhile stays pending for the next wait point.
    pub fn wait_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        self.countdown.start(ms);
        self.signals.wait_any(WakeFlags::TIMER_EXPIRED, None);
    }

    /// Ask the blocking discover/listen/exchange call to give up.
    pub fn request_stop(&self) {
        self.signals.request_stop();
    }

    /// Cloneable handle other threads use to call `request_stop()`.
    pub fn stop_handle(&self) -> InterruptSignalBridge {
        self.signals.clone()
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    pub fn is_field_on(&self) -> bool {
        self.power.is_field_on()
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub(crate) fn require_initialized(&self, op: &str) {
        assert!(
            self.power.state() != PowerState::Uninitialized,
            "{} called before initialize()",
            op
        );
    }

    /// Common entry of the blocking calls: precondition check and dropping
    /// stale wake-ups. A pending stop request is kept.
    pub(crate) fn begin_call(&mut self, op: &str) {
        self.require_initialized(op);
        self.signals
            .clear(WakeFlags::ENGINE_EVENT | WakeFlags::TIMER_EXPIRED);
    }

    pub(crate) fn stop_requested(&self) -> bool {
        !self.signals.take(WakeFlags::STOP_REQUESTED).is_empty()
    }

    /// Deactivate and sleep, reporting the first failure. Sleep is attempted
    /// even when deactivation fails.
    pub(crate) fn close_session(&mut self) -> Result<()> {
        let deactivated = self
            .engine
            .deactivate()
            .map_err(|code| Error::rejected("deactivate", code));
        let slept = self.power.enter_sleep(&mut self.engine);
        debug!("session closed");
        deactivated.and(slept)
    }

    /// `close_session` on a failure path, where the original error wins.
    pub(crate) fn abort_session(&mut self) {
        if let Err(e) = self.close_session() {
            warn!("failed to park front end after error: {}", e);
        }
    }
}

impl<E: RfEngine> Drop for Driver<E> {
    fn drop(&mut self) {
        if self.config.deactivate_on_drop && self.power.state() == PowerState::Active {
            self.abort_session();
        }
    }
}
