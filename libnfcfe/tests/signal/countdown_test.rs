use std::time::{Duration, Instant};

use libnfcfe::countdown::{CountdownState, CountdownTimer};
use libnfcfe::hal::StdTickTimer;
use libnfcfe::signal::{InterruptSignalBridge, WakeFlags};

fn threaded_countdown() -> (CountdownTimer, InterruptSignalBridge) {
    let signals = InterruptSignalBridge::new();
    signals.register_current();
    let mut countdown = CountdownTimer::new(
        Box::new(StdTickTimer::new()),
        CountdownState::leaked(),
        signals.clone(),
    );
    countdown.configure();
    (countdown, signals)
}

#[test]
fn countdown_posts_timer_expired() {
    let (mut countdown, signals) = threaded_countdown();
    let started = Instant::now();
    countdown.start(25);
    let got = signals.wait_any(WakeFlags::TIMER_EXPIRED, None);

    assert_eq!(got, WakeFlags::TIMER_EXPIRED);
    assert!(started.elapsed() >= Duration::from_millis(25));
    assert!(countdown.expired());
    assert!(!countdown.is_armed());
}

#[test]
fn countdown_rearms_after_expiry() {
    let (mut countdown, signals) = threaded_countdown();
    for ms in [3, 7, 1] {
        countdown.start(ms);
        signals.wait_any(WakeFlags::TIMER_EXPIRED, None);
        assert!(countdown.expired());
    }
}

#[test]
#[should_panic(expected = "already armed")]
fn double_start_panics() {
    let (mut countdown, _signals) = threaded_countdown();
    countdown.start(1_000);
    countdown.start(1_000);
}
