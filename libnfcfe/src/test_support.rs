//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the mock driver setup so tests across the crate
//! and the tests/ directory share one wiring: a [`MockEngine`], an
//! auto-firing [`MockTimer`], a stepping [`MockCycleCounter`] and a private
//! countdown.
#![allow(dead_code)]

use crate::config::DriverConfig;
use crate::countdown::{CountdownState, CountdownTimer};
use crate::driver::{Driver, DriverBuilder};
use crate::engine::MockEngine;
use crate::hal::{MockCycleCounter, MockTimer};
use crate::signal::InterruptSignalBridge;
use crate::Result;

/// Cycles the mock counter advances per read in the default wiring.
#[doc(hidden)]
pub const DEFAULT_CYCLE_STEP: u32 = 10;

/// Build an uninitialized driver around `engine` with the default config.
#[doc(hidden)]
pub fn mock_driver(engine: MockEngine) -> Driver<MockEngine> {
    mock_driver_with(
        engine,
        DriverConfig::default(),
        MockCycleCounter::new(DEFAULT_CYCLE_STEP),
    )
}

/// Same as [`mock_driver`] with an explicit config and cycle counter. The
/// counter is shared, so the caller may keep a clone to observe elapsed
/// cycles.
#[doc(hidden)]
pub fn mock_driver_with(
    engine: MockEngine,
    config: DriverConfig,
    cycles: MockCycleCounter,
) -> Driver<MockEngine> {
    let signals = InterruptSignalBridge::new();
    let countdown = CountdownTimer::new(
        Box::new(MockTimer::auto_firing()),
        CountdownState::leaked(),
        signals.clone(),
    );
    Driver::from_parts(engine, countdown, signals, Box::new(cycles), config)
}

/// Convenience: create and initialize a mock driver on the calling thread.
#[doc(hidden)]
pub fn initialized_mock_driver(engine: MockEngine) -> Result<Driver<MockEngine>> {
    let mut driver = mock_driver(engine);
    driver.initialize()?;
    Ok(driver)
}

/// Initialized mock driver whose cycle counter advances `step` cycles
/// (microseconds at 1 MHz) per read. Returns a handle on the counter.
#[doc(hidden)]
pub fn initialized_mock_driver_with_clock(
    engine: MockEngine,
    step: u32,
) -> Result<(Driver<MockEngine>, MockCycleCounter)> {
    let clock = MockCycleCounter::new(step);
    let mut driver = mock_driver_with(engine, DriverConfig::default(), clock.clone());
    driver.initialize()?;
    Ok((driver, clock))
}

/// Builder pre-loaded with mock timer, counter and a private countdown; the
/// caller only adds an engine (and optionally a config).
#[doc(hidden)]
pub fn mock_builder() -> DriverBuilder<MockEngine> {
    DriverBuilder::new()
        .with_timer(MockTimer::auto_firing())
        .with_cycle_counter(MockCycleCounter::new(DEFAULT_CYCLE_STEP))
        .with_countdown_state(CountdownState::leaked())
}
