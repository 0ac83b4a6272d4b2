// libnfcfe/src/power.rs

use log::{debug, warn};

use crate::countdown::CountdownTimer;
use crate::engine::RfEngine;
use crate::signal::InterruptSignalBridge;
use crate::{Error, Result};

/// Power state of the front end as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Uninitialized,
    /// Engine in low-power mode, field off.
    Idle,
    /// Low-power mode exited; the field may be on.
    Active,
}

/// Tracks and drives `Uninitialized -> Idle -> Active -> Idle`.
#[derive(Debug)]
pub struct PowerModeController {
    state: PowerState,
    field: bool,
}

impl Default for PowerModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerModeController {
    pub fn new() -> Self {
        Self {
            state: PowerState::Uninitialized,
            field: false,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn is_field_on(&self) -> bool {
        self.field
    }

    fn require_initialized(&self, op: &str) {
        assert!(
            self.state != PowerState::Uninitialized,
            "{} called before initialize()",
            op
        );
    }

    /// Configure the countdown peripheral, bind the signal bridge to the
    /// calling thread and the engine's event hook, then bring the engine up
    /// and park it in low power. On failure the state stays `Uninitialized`.
    pub fn initialize(
        &mut self,
        engine: &mut dyn RfEngine,
        countdown: &mut CountdownTimer,
        signals: &InterruptSignalBridge,
    ) -> Result<()> {
        self.state = PowerState::Uninitialized;
        self.field = false;
        countdown.configure();
        signals.register_current();
        engine.set_event_callback(signals.engine_callback());

        engine
            .initialize()
            .map_err(|code| Error::rejected("initialize", code))?;
        engine
            .enter_low_power()
            .map_err(|code| Error::rejected("enter_low_power", code))?;

        self.state = PowerState::Idle;
        debug!("power: Uninitialized -> Idle");
        Ok(())
    }

    /// Leave low power and energize the field. Only valid from `Idle`.
    pub fn field_on(&mut self, engine: &mut dyn RfEngine) -> Result<()> {
        assert_eq!(
            self.state,
            PowerState::Idle,
            "field_on requires Idle power state"
        );
        engine
            .exit_low_power()
            .map_err(|code| Error::rejected("exit_low_power", code))?;
        if let Err(code) = engine.field_on() {
            if let Err(e) = engine.enter_low_power() {
                warn!("power: re-entering low power after failed field_on: {}", e);
            }
            return Err(Error::rejected("field_on", code));
        }
        self.state = PowerState::Active;
        self.field = true;
        debug!("power: Idle -> Active (field on)");
        Ok(())
    }

    /// De-energize the field and re-enter low power. Idempotent.
    pub fn field_off(&mut self, engine: &mut dyn RfEngine) -> Result<()> {
        self.require_initialized("field_off");
        if self.state == PowerState::Idle && !self.field {
            return Ok(());
        }
        engine
            .field_off()
            .map_err(|code| Error::rejected("field_off", code))?;
        self.field = false;
        self.enter_sleep(engine)
    }

    /// Leave low power ahead of a discover/listen/exchange. No-op when
    /// already active.
    pub fn exit_sleep(&mut self, engine: &mut dyn RfEngine) -> Result<()> {
        self.require_initialized("exit_sleep");
        if self.state == PowerState::Active {
            return Ok(());
        }
        engine
            .exit_low_power()
            .map_err(|code| Error::rejected("exit_low_power", code))?;
        self.state = PowerState::Active;
        debug!("power: Idle -> Active");
        Ok(())
    }

    /// Return to low power; the engine drops the field on the way. No-op
    /// when already idle.
    pub fn enter_sleep(&mut self, engine: &mut dyn RfEngine) -> Result<()> {
        self.require_initialized("enter_sleep");
        if self.state == PowerState::Idle {
            return Ok(());
        }
        engine
            .enter_low_power()
            .map_err(|code| Error::rejected("enter_low_power", code))?;
        self.state = PowerState::Idle;
        self.field = false;
        debug!("power: Active -> Idle");
        Ok(())
    }
}
