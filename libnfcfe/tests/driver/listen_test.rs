#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use libnfcfe::engine::{EngineCall, EngineState, MockEngine};
use libnfcfe::prelude::*;

#[test]
fn listen_times_out_after_500ms() {
    let mut driver = common::helpers::realtime_driver(MockEngine::new(), DriverConfig::default());
    let identity = common::fixtures::sample_identity();

    let started = Instant::now();
    let activated = driver.listen(&identity, 500).unwrap();
    let elapsed = started.elapsed();

    assert!(!activated);
    assert!(elapsed >= Duration::from_millis(500), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1500), "{:?}", elapsed);
    assert_eq!(driver.engine().state(), EngineState::Idle);
    assert_eq!(driver.engine().count(&EngineCall::Deactivate), 1);
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn listen_then_answer_reader() {
    common::helpers::init_logging();
    let mut engine = MockEngine::new();
    engine.push_states(&[EngineState::Discovery, EngineState::Activated]);
    engine.push_statuses(&[ExchangeStatus::Busy, ExchangeStatus::Done]);
    engine.set_received(&common::fixtures::select_aid_apdu());
    let mut driver = common::helpers::initialized_mock_driver(engine).unwrap();

    let identity = common::fixtures::sample_identity();
    assert!(driver.listen(&identity, 1000).unwrap());
    assert_eq!(driver.engine().identity, Some(identity));

    let answer = common::fixtures::status_ok();
    let mut rx = [0u8; 16];
    let mut ctx = TxRxContext::new(&answer, &mut rx, ExchangeKind::IsoDep);
    driver.exchange(&mut ctx, true).unwrap();

    assert_eq!(ctx.rx_bits, 32);
    assert_eq!(ctx.received(), common::fixtures::select_aid_apdu().as_slice());
    assert_eq!(driver.power_state(), PowerState::Idle);
}

#[test]
fn rejected_identity_never_reaches_engine() {
    let uid = hex::decode("0102030405").unwrap();
    let err = ListenIdentity::new(&uid, [0x04, 0x00], 0x20).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}
