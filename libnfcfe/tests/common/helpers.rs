use libnfcfe::config::DriverConfig;
use libnfcfe::countdown::CountdownState;
use libnfcfe::driver::{Driver, DriverBuilder};
use libnfcfe::engine::MockEngine;
use libnfcfe::hal::{MockTimer, StdCycleCounter, StdTickTimer};

pub use libnfcfe::test_support::{initialized_mock_driver, mock_driver};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Initialized driver on a real (microsecond) cycle counter, for tests that
/// measure wall-clock behavior of the busy-poll paths.
pub fn realtime_driver(engine: MockEngine, config: DriverConfig) -> Driver<MockEngine> {
    init_logging();
    let mut driver = DriverBuilder::new()
        .with_engine(engine)
        .with_timer(MockTimer::auto_firing())
        .with_cycle_counter(StdCycleCounter::new())
        .with_countdown_state(CountdownState::leaked())
        .with_config(config)
        .build()
        .unwrap();
    driver.initialize().unwrap();
    driver
}

/// Initialized driver whose countdown runs on a threaded tick timer.
pub fn threaded_timer_driver(
    engine: MockEngine,
    countdown: &'static CountdownState,
) -> Driver<MockEngine> {
    init_logging();
    let mut driver = DriverBuilder::new()
        .with_engine(engine)
        .with_timer(StdTickTimer::new())
        .with_countdown_state(countdown)
        .build()
        .unwrap();
    driver.initialize().unwrap();
    driver
}
