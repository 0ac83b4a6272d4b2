// libnfcfe/src/driver/builder.rs

use crate::config::DriverConfig;
use crate::countdown::{CountdownState, CountdownTimer};
use crate::driver::Driver;
use crate::engine::RfEngine;
use crate::hal::{CycleCounter, StdCycleCounter, StdTickTimer, TickTimer};
use crate::signal::InterruptSignalBridge;
use crate::{Error, Result};

/// Assembles a [`Driver`] from an engine and its hardware pieces.
///
/// Only the engine is mandatory. The timer and cycle counter default to the
/// host implementations and the countdown to the process-wide state.
pub struct DriverBuilder<E: RfEngine> {
    engine: Option<E>,
    timer: Option<Box<dyn TickTimer>>,
    cycles: Option<Box<dyn CycleCounter>>,
    countdown: Option<&'static CountdownState>,
    signals: Option<InterruptSignalBridge>,
    config: DriverConfig,
}

impl<E: RfEngine> Default for DriverBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RfEngine> DriverBuilder<E> {
    pub fn new() -> Self {
        Self {
            engine: None,
            timer: None,
            cycles: None,
            countdown: None,
            signals: None,
            config: DriverConfig::default(),
        }
    }

    pub fn with_engine(mut self, engine: E) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_timer(mut self, timer: impl TickTimer + 'static) -> Self {
        self.timer = Some(Box::new(timer));
        self
    }

    pub fn with_cycle_counter(mut self, cycles: impl CycleCounter + 'static) -> Self {
        self.cycles = Some(Box::new(cycles));
        self
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a private countdown instead of the global one. Needed when more
    /// than one simulated timer lives in the process.
    pub fn with_countdown_state(mut self, state: &'static CountdownState) -> Self {
        self.countdown = Some(state);
        self
    }

    /// Share an existing signal bridge, e.g. one already handed to an
    /// interrupt handler.
    pub fn with_signals(mut self, signals: InterruptSignalBridge) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn build(self) -> Result<Driver<E>> {
        let engine = self.engine.ok_or(Error::MissingComponent("engine"))?;
        if self.config.exchange_hard_timeout_ms == 0 {
            return Err(Error::InvalidParameter(
                "exchange_hard_timeout_ms must be non-zero".to_string(),
            ));
        }

        let signals = self.signals.unwrap_or_default();
        let timer = self
            .timer
            .unwrap_or_else(|| Box::new(StdTickTimer::new()));
        let cycles = self
            .cycles
            .unwrap_or_else(|| Box::new(StdCycleCounter::new()));
        let state = self.countdown.unwrap_or_else(CountdownState::global);
        let countdown = CountdownTimer::new(timer, state, signals.clone());

        Ok(Driver::from_parts(
            engine,
            countdown,
            signals,
            cycles,
            self.config,
        ))
    }
}
