// Discovery + ISO-DEP exchange against the scripted mock engine.

// Run with `RUST_LOG=libnfcfe=trace cargo run --example discover_and_exchange`
// to see the engine states and frames the driver walks through.

use libnfcfe::countdown::CountdownState;
use libnfcfe::engine::{EngineState, MockEngine};
use libnfcfe::hal::{MockTimer, StdCycleCounter};
use libnfcfe::prelude::*;

fn scripted_engine() -> anyhow::Result<MockEngine> {
    let mut engine = MockEngine::new();
    engine.notify_on_step = true;
    engine.push_states(&[
        EngineState::Discovery,
        EngineState::Discovery,
        EngineState::PollSelect,
        EngineState::Activated,
    ]);
    engine.push_device(DeviceDescriptor::nfc_a(
        &[0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0x80],
        [0x44, 0x00],
        0x20,
    )?);
    engine.push_statuses(&[
        ExchangeStatus::Busy,
        ExchangeStatus::WaitingTimeExtension,
        ExchangeStatus::Busy,
        ExchangeStatus::Done,
    ]);
    engine.set_received(&[0x6F, 0x00, 0x90, 0x00]);
    Ok(engine)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut driver = DriverBuilder::new()
        .with_engine(scripted_engine()?)
        .with_timer(MockTimer::auto_firing())
        .with_cycle_counter(StdCycleCounter::new())
        .with_countdown_state(CountdownState::leaked())
        .build()?;
    driver.initialize()?;
    println!("front end initialized: {:?}", driver.power_state());

    let mut storage = [DeviceDescriptor::default(); 4];
    let mut devices = DiscoveredDeviceList::new(&mut storage);
    let request = DiscoveryRequest::new(TechMask::NFC_A | TechMask::NFC_B)
        .with_device_limit(4)
        .with_total_duration_ms(1000)
        .keep_active();

    if !driver.discover(&request, &mut devices)? {
        println!("no device in range");
        return Ok(());
    }
    for (i, device) in devices.iter().enumerate() {
        println!(
            "device {}: {:?} nfcid={}",
            i + 1,
            device.technology,
            device.nfcid.to_hex()
        );
    }

    let select = [0x00, 0xA4, 0x04, 0x0C];
    let mut rx = [0u8; 64];
    let mut ctx = TxRxContext::new(&select, &mut rx, ExchangeKind::IsoDep);
    match driver.exchange(&mut ctx, true) {
        Ok(()) => println!("answer: {}", bytes_to_hex(ctx.received())),
        Err(e) if e.is_retryable() => println!("no answer, try again: {}", e),
        Err(e) if e.is_fatal_exchange() => println!("present the card again: {}", e),
        Err(e) => return Err(e.into()),
    }

    println!("front end parked: {:?}", driver.power_state());
    Ok(())
}
