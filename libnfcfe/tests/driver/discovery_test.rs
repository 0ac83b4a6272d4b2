#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use libnfcfe::engine::{EngineCall, EngineState, MockEngine};
use libnfcfe::prelude::*;

#[test]
fn discover_nfc_a_finds_one_device() {
    common::helpers::init_logging();
    let mut driver =
        common::helpers::initialized_mock_driver(common::fixtures::engine_finding_one_device())
            .unwrap();
    let mut storage = [DeviceDescriptor::default(); 3];
    let mut devices = DiscoveredDeviceList::new(&mut storage);

    let request = DiscoveryRequest::new(TechMask::NFC_A)
        .with_device_limit(3)
        .with_total_duration_ms(1000);
    let found = driver.discover(&request, &mut devices).unwrap();

    assert!(found);
    assert_eq!(devices.len(), 1);
    let device = devices.first().unwrap();
    assert_eq!(device.technology, Technology::NfcA);
    assert_eq!(device.nfcid.as_bytes(), common::fixtures::sample_uid().as_slice());
    assert!(driver.engine().calls.contains(&EngineCall::DiscoverStart {
        tech_mask: TechMask::NFC_A,
        device_limit: 3,
        total_duration_ms: 1000,
    }));
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn discover_without_device_returns_within_duration() {
    common::helpers::init_logging();
    // Engine keeps polling and never reports a device.
    let mut driver = common::helpers::initialized_mock_driver(MockEngine::new()).unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let mut devices = DiscoveredDeviceList::new(&mut storage);

    let request = DiscoveryRequest::new(TechMask::ALL).with_total_duration_ms(100);
    let started = Instant::now();
    let found = driver.discover(&request, &mut devices).unwrap();
    let elapsed = started.elapsed();

    assert!(!found);
    assert!(devices.is_empty());
    assert!(elapsed >= Duration::from_millis(100), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(100 + 900), "{:?}", elapsed);
    assert_eq!(driver.engine().state(), EngineState::Idle);
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn discover_with_events_flowing_returns_within_duration() {
    common::helpers::init_logging();
    // Engine notifies the worker on every step but never activates a device.
    let mut engine = MockEngine::new();
    engine.notify_on_step = true;
    let mut driver = common::helpers::initialized_mock_driver(engine).unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let mut devices = DiscoveredDeviceList::new(&mut storage);

    let request = DiscoveryRequest::new(TechMask::NFC_A).with_total_duration_ms(50);
    let started = Instant::now();
    let found = driver.discover(&request, &mut devices).unwrap();
    let elapsed = started.elapsed();

    assert!(!found);
    assert!(elapsed >= Duration::from_millis(50), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(50 + 950), "{:?}", elapsed);
    assert_eq!(driver.engine().state(), EngineState::Idle);
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn discover_then_exchange_reuses_activation() {
    common::helpers::init_logging();
    let mut engine = common::fixtures::engine_finding_one_device();
    engine.push_statuses(&[ExchangeStatus::Busy, ExchangeStatus::Done]);
    engine.set_received(&common::fixtures::status_ok());
    let mut driver = common::helpers::initialized_mock_driver(engine).unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let mut devices = DiscoveredDeviceList::new(&mut storage);

    let request = DiscoveryRequest::new(TechMask::NFC_A).keep_active();
    assert!(driver.discover(&request, &mut devices).unwrap());

    let tx = common::fixtures::select_aid_apdu();
    let mut rx = [0u8; 8];
    let mut ctx = TxRxContext::new(&tx, &mut rx, ExchangeKind::IsoDep);
    driver.exchange(&mut ctx, true).unwrap();

    assert_eq!(ctx.received(), common::fixtures::status_ok().as_slice());
    // One deactivation, after the exchange
    assert_eq!(driver.engine().count(&EngineCall::Deactivate), 1);
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn back_to_back_discoveries() {
    common::helpers::init_logging();
    let mut driver =
        common::helpers::initialized_mock_driver(common::fixtures::engine_finding_one_device())
            .unwrap();
    let mut storage = [DeviceDescriptor::default(); 1];
    let request = DiscoveryRequest::new(TechMask::NFC_A);

    let mut devices = DiscoveredDeviceList::new(&mut storage);
    assert!(driver.discover(&request, &mut devices).unwrap());

    // Script replayed for the second run
    driver.engine_mut().push_states(&[
        EngineState::Discovery,
        EngineState::PollSelect,
        EngineState::Activated,
    ]);
    let mut devices = DiscoveredDeviceList::new(&mut storage);
    assert!(driver.discover(&request, &mut devices).unwrap());
    assert_eq!(driver.engine().count(&EngineCall::Select(0)), 2);
}
