#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::{Duration, Instant};

use libnfcfe::engine::{EngineState, MockEngine};
use libnfcfe::prelude::*;

const STOP_AFTER: Duration = Duration::from_millis(50);
const RETURN_WITHIN: Duration = Duration::from_secs(2);

/// Post a stop request from another thread after `STOP_AFTER`.
fn stop_later(handle: InterruptSignalBridge) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(STOP_AFTER);
        handle.request_stop();
    })
}

#[test]
fn stop_interrupts_blocked_discover() {
    common::helpers::init_logging();
    let mut driver = common::helpers::initialized_mock_driver(MockEngine::new()).unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let mut devices = DiscoveredDeviceList::new(&mut storage);
    let request = DiscoveryRequest::new(TechMask::NFC_A).with_total_duration_ms(10_000);

    let stopper = stop_later(driver.stop_handle());
    let started = Instant::now();
    let result = driver.discover(&request, &mut devices);
    stopper.join().unwrap();

    assert_eq!(result, Err(Error::Cancelled));
    assert!(started.elapsed() < RETURN_WITHIN, "{:?}", started.elapsed());
    assert_eq!(driver.engine().state(), EngineState::Idle);
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn stop_interrupts_busy_polling_listen() {
    let mut driver = common::helpers::realtime_driver(MockEngine::new(), DriverConfig::default());
    let identity = common::fixtures::sample_identity();

    let stopper = stop_later(driver.stop_handle());
    let started = Instant::now();
    let result = driver.listen(&identity, 10_000);
    stopper.join().unwrap();

    assert_eq!(result, Err(Error::Cancelled));
    assert!(started.elapsed() < RETURN_WITHIN, "{:?}", started.elapsed());
    assert_eq!(driver.engine().state(), EngineState::Idle);
}

#[test]
fn stop_interrupts_stalled_exchange() {
    let config = DriverConfig::default().with_exchange_timeout_ms(10_000);
    let mut driver =
        common::helpers::realtime_driver(common::fixtures::activated_engine(), config);
    let tx = common::fixtures::select_aid_apdu();
    let mut rx = [0u8; 8];
    let mut ctx = TxRxContext::new(&tx, &mut rx, ExchangeKind::IsoDep);

    let stopper = stop_later(driver.stop_handle());
    let started = Instant::now();
    let result = driver.exchange(&mut ctx, false);
    stopper.join().unwrap();

    assert_eq!(result, Err(Error::Cancelled));
    assert!(started.elapsed() < RETURN_WITHIN, "{:?}", started.elapsed());
    assert_eq!(ctx.rx_bits, 0);
    assert_eq!(driver.engine().state(), EngineState::Idle);
}

#[test]
fn stop_is_consumed_once() {
    common::helpers::init_logging();
    let mut driver = common::helpers::initialized_mock_driver(MockEngine::new()).unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let mut devices = DiscoveredDeviceList::new(&mut storage);
    let request = DiscoveryRequest::new(TechMask::NFC_A).with_total_duration_ms(20);

    driver.request_stop();
    assert_eq!(driver.discover(&request, &mut devices), Err(Error::Cancelled));
    // The next call runs normally and simply finds nothing.
    assert_eq!(driver.discover(&request, &mut devices), Ok(false));
}
