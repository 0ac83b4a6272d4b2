// fixtures.rs: commonly used devices, identities and frames

use libnfcfe::engine::{EngineState, MockEngine};
use libnfcfe::types::{DeviceDescriptor, ListenIdentity};

pub fn sample_uid() -> Vec<u8> {
    hex::decode("04a1b2c3").unwrap()
}

pub fn sample_nfc_a() -> DeviceDescriptor {
    DeviceDescriptor::nfc_a(&sample_uid(), [0x44, 0x00], 0x20).unwrap()
}

pub fn sample_identity() -> ListenIdentity {
    let uid = hex::decode("08123456").unwrap();
    ListenIdentity::new(&uid, [0x04, 0x00], 0x20).unwrap()
}

/// ISO 7816 SELECT by AID header, no data.
pub fn select_aid_apdu() -> Vec<u8> {
    hex::decode("00a4040c").unwrap()
}

pub fn status_ok() -> Vec<u8> {
    hex::decode("9000").unwrap()
}

/// Engine that walks discovery -> poll/select -> activated and reports one
/// NFC-A device, notifying the worker after every step.
pub fn engine_finding_one_device() -> MockEngine {
    let mut engine = MockEngine::new();
    engine.notify_on_step = true;
    engine.push_states(&[
        EngineState::Discovery,
        EngineState::PollSelect,
        EngineState::Activated,
    ]);
    engine.push_device(sample_nfc_a());
    engine
}

/// Engine already holding an activated device, ready for `exchange`.
pub fn activated_engine() -> MockEngine {
    let mut engine = MockEngine::new();
    engine.set_state(EngineState::Activated);
    engine.set_received(&status_ok());
    engine
}
